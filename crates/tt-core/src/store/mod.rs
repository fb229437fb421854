//! The board store: single owner of every table's placed schedules
//!
//! All mutation goes through [`ScheduleBoardStore`]. Each operation builds a
//! new entry list only for the table it touches; every other table keeps the
//! exact `Arc` it had before, and entries that are not replaced keep theirs
//! too. Dependents can therefore detect change with `Arc::ptr_eq` instead of
//! comparing contents.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;

use crate::events::{BoardEvent, BoardEventBus, BoardSubscriber, Topic};
use crate::model::{Board, BoardSet, Day, Lecture, PeriodRange, Schedule, TableId};
use crate::parser::parse_schedule;
use crate::settings::BoardSettings;

/// Prefix for generated table ids
const TABLE_ID_PREFIX: &str = "schedule";

/// Owns the board set and publishes topic-scoped change events
pub struct ScheduleBoardStore {
    boards: RwLock<Arc<BoardSet>>,
    active_drag: RwLock<Option<TableId>>,
    next_id: AtomicU64,
    events: BoardEventBus,
}

impl ScheduleBoardStore {
    /// Create a store with one empty table per id.
    ///
    /// Duplicate ids collapse into one table.
    pub fn new(initial_tables: impl IntoIterator<Item = TableId>) -> Self {
        let boards: BoardSet = initial_tables
            .into_iter()
            .map(|id| (id, Board::default()))
            .collect();

        tracing::debug!("Board store created with {} table(s)", boards.len());

        Self {
            boards: RwLock::new(Arc::new(boards)),
            active_drag: RwLock::new(None),
            next_id: AtomicU64::new(1),
            events: BoardEventBus::new(),
        }
    }

    /// Create a store from settings
    pub fn from_settings(settings: &BoardSettings) -> Self {
        Self::new(settings.initial_tables.iter().cloned())
    }

    /// Create a store with a single table named `schedule-1`
    pub fn with_default_table() -> Self {
        Self::from_settings(&BoardSettings::default())
    }

    /// Snapshot of every table
    pub fn boards(&self) -> Arc<BoardSet> {
        self.boards.read().clone()
    }

    /// Snapshot of one table
    pub fn board(&self, id: &TableId) -> Option<Board> {
        self.boards.read().get(id).cloned()
    }

    /// Table ids in creation order
    pub fn table_ids(&self) -> Vec<TableId> {
        self.boards.read().keys().cloned().collect()
    }

    pub fn table_count(&self) -> usize {
        self.boards.read().len()
    }

    /// Subscribe to one topic
    pub fn subscribe(&self, topic: Topic, subscriber: &Arc<dyn BoardSubscriber>) {
        self.events.subscribe(topic, subscriber);
    }

    /// Parse `lecture`'s schedule and append one entry per slot to table `id`.
    ///
    /// Returns the number of entries added. Unknown tables and lectures
    /// without any parseable slot leave the store untouched.
    pub fn add_schedules(&self, id: &TableId, lecture: Arc<Lecture>) -> usize {
        let slots = parse_schedule(&lecture.schedule);
        if slots.is_empty() {
            tracing::debug!("Lecture {} has no placeable slots", lecture.id);
            return 0;
        }

        let added = slots.len();
        let changed = self.update_table(id, |entries| {
            let mut next = Vec::with_capacity(entries.len() + added);
            next.extend(entries.iter().cloned());
            next.extend(slots.into_iter().map(|slot| {
                Arc::new(Schedule {
                    lecture: Arc::clone(&lecture),
                    day: slot.day,
                    range: slot.range,
                    room: slot.room,
                })
            }));
            Some(next)
        });

        if changed {
            tracing::info!("Added {} slot(s) of lecture {} to table {}", added, lecture.id, id);
            added
        } else {
            0
        }
    }

    /// Remove every entry of table `id` that occupies `period` on `day`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_schedule(&self, id: &TableId, day: Day, period: u8) -> usize {
        let mut removed = 0;
        self.update_table(id, |entries| {
            removed = entries.iter().filter(|s| s.occupies(day, period)).count();
            if removed == 0 {
                return None;
            }
            Some(
                entries
                    .iter()
                    .filter(|s| !s.occupies(day, period))
                    .cloned()
                    .collect(),
            )
        });

        if removed > 0 {
            tracing::debug!("Removed {} entries at {}{} from table {}", removed, day, period, id);
        }
        removed
    }

    /// Replace entry `index` of table `id` with the same lecture at a new position.
    ///
    /// Returns `false` when the table or index does not exist or the position
    /// is unchanged.
    pub fn move_schedule(&self, id: &TableId, index: usize, day: Day, range: PeriodRange) -> bool {
        self.update_table(id, |entries| {
            let current = entries.get(index)?;
            if current.day == day && current.range == range {
                return None;
            }
            let mut next: Vec<Arc<Schedule>> = entries.to_vec();
            next[index] = Arc::new(current.moved_to(day, range));
            Some(next)
        })
    }

    /// Copy table `source` under a fresh id and return that id.
    ///
    /// The copy shares the source's entries but owns its own list.
    pub fn duplicate_table(&self, source: &TableId) -> Option<TableId> {
        let new_id = {
            let mut boards = self.boards.write();
            let entries = boards.get(source)?;
            let copy: Board = Arc::new(entries.as_ref().clone());
            let new_id = self.fresh_id(&boards);
            Arc::make_mut(&mut boards).insert(new_id.clone(), copy);
            new_id
        };

        tracing::info!("Duplicated table {} as {}", source, new_id);
        self.events.publish(&[BoardEvent::TableAdded {
            id: new_id.clone(),
            source: Some(source.clone()),
        }]);
        Some(new_id)
    }

    /// Delete table `id`. Removing the last table is allowed.
    pub fn remove_table(&self, id: &TableId) -> bool {
        let removed = {
            let mut boards = self.boards.write();
            if !boards.contains_key(id) {
                return false;
            }
            Arc::make_mut(&mut boards).shift_remove(id).is_some()
        };

        if removed {
            tracing::info!("Removed table {}", id);
            self.events.publish(&[BoardEvent::TableRemoved(id.clone())]);
            self.events.forget_table(id);
            if self.active_drag_table().as_ref() == Some(id) {
                self.set_active_drag(None);
            }
        }
        removed
    }

    /// Table the active drag originates from, if any
    pub fn active_drag_table(&self) -> Option<TableId> {
        self.active_drag.read().clone()
    }

    /// Record which table a drag originates from; `None` ends it
    pub fn set_active_drag(&self, table: Option<TableId>) -> bool {
        {
            let mut active = self.active_drag.write();
            if *active == table {
                return false;
            }
            *active = table.clone();
        }
        self.events.publish(&[BoardEvent::ActiveDragChanged(table)]);
        true
    }

    /// Apply `f` to table `id`'s entries.
    ///
    /// `f` returns `None` to signal "no change", in which case nothing is
    /// allocated or published. The write lock is released before
    /// subscribers run, so they always observe the committed state.
    fn update_table<F>(&self, id: &TableId, f: F) -> bool
    where
        F: FnOnce(&[Arc<Schedule>]) -> Option<Vec<Arc<Schedule>>>,
    {
        {
            let mut boards = self.boards.write();
            let Some(entries) = boards.get(id) else {
                tracing::debug!("Ignoring update for unknown table {}", id);
                return false;
            };
            let Some(next) = f(entries.as_slice()) else {
                return false;
            };
            if let Some(slot) = Arc::make_mut(&mut boards).get_mut(id) {
                *slot = Arc::new(next);
            }
        }

        self.events.publish(&[BoardEvent::TableChanged(id.clone())]);
        true
    }

    fn fresh_id(&self, boards: &BoardSet) -> TableId {
        loop {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed);
            let candidate = TableId::new(format!("{}-{}", TABLE_ID_PREFIX, n));
            if !boards.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for ScheduleBoardStore {
    fn default() -> Self {
        Self::with_default_table()
    }
}

#[cfg(test)]
mod tests;
