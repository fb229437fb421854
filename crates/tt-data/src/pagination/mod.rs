//! Incremental reveal of a filtered result list
//!
//! Results are shown a page at a time. A sentinel rendered just past the
//! visible slice reports when it scrolls into view, which reveals the next
//! page.

/// Rows revealed per page
pub const PAGE_SIZE: usize = 100;

/// Scrollable element holding the result list.
///
/// Passed in by the caller on reset; the controller keeps no reference to it.
pub trait ScrollContainer {
    fn scroll_to_origin(&mut self);
}

/// Container that ignores scroll requests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScroll;

impl ScrollContainer for NoScroll {
    fn scroll_to_origin(&mut self) {}
}

/// Tracks how many pages of results are revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationController {
    page: usize,
}

impl PaginationController {
    pub fn new() -> Self {
        Self { page: 1 }
    }

    /// Current page, starting at 1
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        PAGE_SIZE
    }

    /// Number of pages needed for `total` results
    pub fn last_page(&self, total: usize) -> usize {
        total.div_ceil(PAGE_SIZE)
    }

    /// The revealed prefix of `filtered`
    pub fn visible<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        let end = self.page.saturating_mul(PAGE_SIZE).min(filtered.len());
        &filtered[..end]
    }

    /// Whether results remain past the visible slice
    pub fn has_more(&self, total: usize) -> bool {
        self.page < self.last_page(total)
    }

    /// Reveal one more page, never past the last one.
    ///
    /// The page never drops below 1, even for an empty result list.
    pub fn advance(&mut self, total: usize) -> usize {
        let next = (self.page + 1).min(self.last_page(total)).max(1);
        if next != self.page {
            tracing::debug!("Revealing page {} of {}", next, self.last_page(total));
        }
        self.page = next;
        self.page
    }

    /// Sentinel past the visible slice became visible
    pub fn on_sentinel_visible(&mut self, total: usize) -> usize {
        self.advance(total)
    }

    /// Back to the first page, scrolled to the top
    pub fn reset(&mut self, scroll: &mut dyn ScrollContainer) {
        self.page = 1;
        scroll.scroll_to_origin();
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new()
    }
}
