//! Pagination State
//!
//! Bookkeeping for how much of the result set is rendered and which page
//! to fetch next in each direction, plus the button state derived from it.

use crate::config::GridConfig;

/// Single-flight guard shared by both directions
///
/// A click arriving while `Fetching` is dropped, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchLatch {
    #[default]
    Idle,
    Fetching,
}

/// Which end of the list a load extends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// "Load more": append the next page
    Forward,
    /// "Load previous": prepend the page before the first rendered one
    Backward,
}

/// Visual state of a load button, always derived from [`PaginationState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub visible: bool,
    pub disabled: bool,
    /// Spinner shown and label hidden while a fetch is in flight
    pub showing_spinner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub products_per_page: u32,
    pub total_products_count: u32,
    /// Next page to fetch forward
    pub current_page: u32,
    /// Product nodes rendered by the server when the state was derived
    pub displayed_products_count: u32,
    pub loaded_products_count: u32,
    /// Next page to fetch backward; below 1 means there is none
    pub previous_page: i64,
    latch: FetchLatch,
}

impl PaginationState {
    /// Derive the state for a grid whose server render shows `page`
    ///
    /// Without a page parameter the first page is on screen. With one, every
    /// earlier page is assumed to have been full, so `loaded_products_count`
    /// overcounts when one of them was partial.
    pub fn initialize(
        config: &GridConfig,
        page: Option<u32>,
        displayed_products_count: u32,
    ) -> Self {
        let (current_page, loaded_products_count, previous_page) = match page {
            None => (2, displayed_products_count, -1),
            Some(page) => (
                page.saturating_add(1),
                page.saturating_mul(displayed_products_count),
                i64::from(page) - 1,
            ),
        };

        Self {
            products_per_page: config.products_per_page,
            total_products_count: config.total_products_count,
            current_page,
            displayed_products_count,
            loaded_products_count,
            previous_page,
            latch: FetchLatch::Idle,
        }
    }

    pub fn latch(&self) -> FetchLatch {
        self.latch
    }

    pub fn is_fetching(&self) -> bool {
        self.latch == FetchLatch::Fetching
    }

    /// Forward direction exhausted
    pub fn all_loaded(&self) -> bool {
        self.loaded_products_count >= self.total_products_count
    }

    /// Backward direction exhausted
    pub fn at_first_page(&self) -> bool {
        self.previous_page < 1
    }

    /// Close the latch and return the page to fetch in `direction`
    ///
    /// Returns `None`, leaving the state untouched, when a fetch is already
    /// in flight or the direction is exhausted.
    pub fn begin(&mut self, direction: Direction) -> Option<u32> {
        if self.is_fetching() {
            return None;
        }
        let page = match direction {
            Direction::Forward if !self.all_loaded() => self.current_page,
            Direction::Backward if !self.at_first_page() => u32::try_from(self.previous_page).ok()?,
            _ => return None,
        };
        self.latch = FetchLatch::Fetching;
        Some(page)
    }

    /// Record a successful forward fetch of `fetched` fragments
    pub fn complete_forward(&mut self, fetched: usize) {
        let fetched = u32::try_from(fetched).unwrap_or(u32::MAX);
        self.loaded_products_count = self.loaded_products_count.saturating_add(fetched);
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Record a successful backward fetch
    pub fn complete_backward(&mut self) {
        self.previous_page -= 1;
    }

    /// Reopen the latch after a fetch settles, successful or not
    pub fn release(&mut self) {
        self.latch = FetchLatch::Idle;
    }

    pub fn button_state(&self, direction: Direction) -> ButtonState {
        let fetching = self.is_fetching();
        let exhausted = match direction {
            Direction::Forward => self.all_loaded(),
            Direction::Backward => self.at_first_page(),
        };
        ButtonState {
            visible: !exhausted,
            disabled: fetching,
            showing_spinner: fetching,
        }
    }
}
