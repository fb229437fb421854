//! State behind one search dialog
//!
//! Ties the catalog, the current criteria, the filter engine and pagination
//! together, and knows which table selected lectures are added to.

use std::sync::Arc;
use tt_core::{Lecture, ScheduleBoardStore, TableId};

use crate::filter::{ScheduleFilterEngine, SearchOptions};
use crate::pagination::{PaginationController, ScrollContainer};

/// One open search dialog targeting a table
pub struct SearchSession {
    target: TableId,
    catalog: Vec<Arc<Lecture>>,
    options: SearchOptions,
    engine: Arc<ScheduleFilterEngine>,
    pagination: PaginationController,
    results: Vec<Arc<Lecture>>,
}

impl SearchSession {
    /// Open a session over `catalog`.
    ///
    /// The filter engine is shared so memoized schedules survive between
    /// dialogs.
    pub fn new(target: TableId, catalog: Vec<Arc<Lecture>>, engine: Arc<ScheduleFilterEngine>) -> Self {
        let options = SearchOptions::default();
        let results = engine.filter(&catalog, &options);
        Self {
            target,
            catalog,
            options,
            engine,
            pagination: PaginationController::new(),
            results,
        }
    }

    pub fn target(&self) -> &TableId {
        &self.target
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    /// Replace the catalog, e.g. after it finished loading
    pub fn set_catalog(&mut self, catalog: Vec<Arc<Lecture>>, scroll: &mut dyn ScrollContainer) {
        self.catalog = catalog;
        self.refresh(scroll);
    }

    /// Apply new criteria. Always returns to the first page and the top of
    /// the list, even if the number of results did not change.
    pub fn set_options(&mut self, options: SearchOptions, scroll: &mut dyn ScrollContainer) {
        self.options = options;
        self.refresh(scroll);
    }

    /// Edit the criteria in place, then apply them
    pub fn update_options<F>(&mut self, scroll: &mut dyn ScrollContainer, f: F)
    where
        F: FnOnce(&mut SearchOptions),
    {
        f(&mut self.options);
        self.refresh(scroll);
    }

    /// All matching lectures
    pub fn results(&self) -> &[Arc<Lecture>] {
        &self.results
    }

    /// Matching lectures revealed so far
    pub fn visible(&self) -> &[Arc<Lecture>] {
        self.pagination.visible(&self.results)
    }

    /// Reveal the next page when the sentinel comes into view
    pub fn on_sentinel_visible(&mut self) -> usize {
        self.pagination.on_sentinel_visible(self.results.len())
    }

    /// Place `lecture` on the target table
    pub fn add_to_board(&self, store: &ScheduleBoardStore, lecture: &Arc<Lecture>) -> usize {
        store.add_schedules(&self.target, Arc::clone(lecture))
    }

    fn refresh(&mut self, scroll: &mut dyn ScrollContainer) {
        self.results = self.engine.filter(&self.catalog, &self.options);
        self.pagination.reset(scroll);
    }
}
