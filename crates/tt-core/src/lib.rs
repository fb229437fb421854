//! Core state for the timetable boards
//!
//! This crate owns the board model and every mutation of it: the
//! schedule-string decoder, the board store with its topic subscriptions,
//! per-board color assignment, and the drag-to-grid controller.

pub mod colors;
pub mod drag;
pub mod events;
pub mod model;
pub mod parser;
pub mod settings;
pub mod store;

use thiserror::Error;

// Re-export commonly used types
pub use colors::{colors_for, Color, PALETTE};
pub use drag::{DragId, DragSnapController, DragState, DropOutcome, Rect, Translation};
pub use events::{subscriber_from_fn, BoardEvent, BoardSubscriber, Topic};
pub use model::{Board, BoardSet, Day, Lecture, PeriodRange, Schedule, TableId, MAX_PERIOD, MIN_PERIOD};
pub use parser::{parse_schedule, ParsedSlot};
pub use settings::{BoardSettings, GridGeometry};
pub use store::ScheduleBoardStore;

/// Errors surfaced by the core.
///
/// Board operations themselves are total; only decoding of external
/// identifiers can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid drag id: {0:?}")]
    InvalidDragId(String),
}
