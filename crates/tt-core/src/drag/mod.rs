//! Drag-to-grid placement
//!
//! A drag has two phases. While the pointer moves, [`DragSnapController::snap`]
//! turns the raw translation into a cell-aligned, clamped one for display;
//! it never touches board state. On drop, [`DragSnapController::commit`]
//! quantizes the final delta into whole days and periods and moves the
//! dragged entry through the store.

use std::fmt;
use std::str::FromStr;
use parking_lot::Mutex;

use crate::model::TableId;
use crate::settings::GridGeometry;
use crate::store::ScheduleBoardStore;
use crate::CoreError;

mod geometry;

pub use geometry::{snap_translation, Rect, Translation};

/// Separator inside the drag transport id
pub const DRAG_ID_SEPARATOR: char = ':';

/// Identifies the dragged entry: `<tableId>:<index>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragId {
    pub table: TableId,
    pub index: usize,
}

impl DragId {
    pub fn new(table: TableId, index: usize) -> Self {
        Self { table, index }
    }
}

impl fmt::Display for DragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.table, DRAG_ID_SEPARATOR, self.index)
    }
}

impl FromStr for DragId {
    type Err = CoreError;

    /// Splits on the last separator so table ids may themselves contain it
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (table, index) = s
            .rsplit_once(DRAG_ID_SEPARATOR)
            .ok_or_else(|| CoreError::InvalidDragId(s.to_string()))?;
        if table.is_empty() {
            return Err(CoreError::InvalidDragId(s.to_string()));
        }
        let index = index
            .parse()
            .map_err(|_| CoreError::InvalidDragId(s.to_string()))?;
        Ok(Self::new(TableId::from(table), index))
    }
}

/// Drag state machine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragId),
}

/// Whole-cell movement derived from a pixel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDelta {
    pub days: i64,
    pub periods: i64,
}

impl CellDelta {
    /// Floor-quantize a pixel delta
    pub fn from_pixels(geometry: &GridGeometry, delta: Translation) -> Self {
        Self {
            days: quantize(delta.x, geometry.cell_width),
            periods: quantize(delta.y, geometry.cell_height),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.periods == 0
    }
}

/// Result of committing a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was in progress
    NotDragging,
    /// The delta was under one cell on both axes
    BelowThreshold,
    /// Clamping left the entry where it was, or it no longer exists
    Unchanged,
    /// The entry was moved
    Moved { id: DragId, delta: CellDelta },
}

/// Converts pointer drags into board moves.
///
/// Only one drag may be active system-wide; the originating table is
/// published through the store so other tables can render an indicator.
pub struct DragSnapController {
    geometry: GridGeometry,
    state: Mutex<DragState>,
}

impl DragSnapController {
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            state: Mutex::new(DragState::Idle),
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Current state
    pub fn state(&self) -> DragState {
        self.state.lock().clone()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(*self.state.lock(), DragState::Dragging(_))
    }

    /// Begin dragging `id`.
    ///
    /// Refused while another drag is active, and when `id` does not name an
    /// existing entry.
    pub fn start(&self, id: DragId, store: &ScheduleBoardStore) -> bool {
        let exists = store.board(&id.table).map_or(false, |b| id.index < b.len());
        if !exists {
            tracing::debug!("Ignoring drag of unknown entry {}", id);
            return false;
        }

        {
            let mut state = self.state.lock();
            if let DragState::Dragging(active) = &*state {
                tracing::warn!("Ignoring drag of {} while {} is active", id, active);
                return false;
            }
            *state = DragState::Dragging(id.clone());
        }
        store.set_active_drag(Some(id.table));
        true
    }

    /// Live phase: cell-aligned, clamped translation for display
    pub fn snap(&self, raw: Translation, dragged: Rect, container: Rect) -> Translation {
        snap_translation(&self.geometry, raw, dragged, container)
    }

    /// Abandon the drag without committing anything
    pub fn cancel(&self, store: &ScheduleBoardStore) {
        let was_dragging = {
            let mut state = self.state.lock();
            std::mem::take(&mut *state) != DragState::Idle
        };
        if was_dragging {
            tracing::debug!("Drag cancelled");
            store.set_active_drag(None);
        }
    }

    /// Commit phase: move the dragged entry by the floor-quantized `delta`.
    ///
    /// Moves past the grid edges are clamped. When nothing would change the
    /// store is not touched at all.
    pub fn commit(&self, delta: Translation, store: &ScheduleBoardStore) -> DropOutcome {
        let DragState::Dragging(id) = std::mem::take(&mut *self.state.lock()) else {
            return DropOutcome::NotDragging;
        };

        let outcome = commit_move(&self.geometry, store, &id, delta);
        store.set_active_drag(None);
        outcome
    }
}

impl Default for DragSnapController {
    fn default() -> Self {
        Self::new(GridGeometry::default())
    }
}

/// Apply a drop for `id` directly, without the state machine
pub fn commit_move(
    geometry: &GridGeometry,
    store: &ScheduleBoardStore,
    id: &DragId,
    delta: Translation,
) -> DropOutcome {
    let cells = CellDelta::from_pixels(geometry, delta);
    if cells.is_zero() {
        tracing::debug!("Drop of {} below one cell, nothing to do", id);
        return DropOutcome::BelowThreshold;
    }

    let Some(entry) = store.board(&id.table).and_then(|b| b.get(id.index).cloned()) else {
        tracing::debug!("Drop target {} no longer exists", id);
        return DropOutcome::Unchanged;
    };

    let day = entry.day.offset_clamped(cells.days);
    let range = entry.range.shifted_clamped(cells.periods);

    if store.move_schedule(&id.table, id.index, day, range) {
        tracing::debug!("Moved {} to {}{}", id, day, range);
        DropOutcome::Moved { id: id.clone(), delta: cells }
    } else {
        DropOutcome::Unchanged
    }
}

fn quantize(pixels: f64, cell: f64) -> i64 {
    if cell <= 0.0 || !pixels.is_finite() {
        return 0;
    }
    (pixels / cell).floor() as i64
}
