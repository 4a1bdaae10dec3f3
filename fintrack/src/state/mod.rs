pub mod reducer;
pub mod validators;

use crate::utils::math::page_window;

/// How successive pages combine in a list view
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Each load shows exactly one page
    #[default]
    Replace,
    /// "Load more": pages accumulate below the ones already shown
    Append,
}

/// Per-list configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    pub page_size: u32,
    pub mode: ListMode,
}

impl ListConfig {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            mode: ListMode::Replace,
        }
    }

    pub fn append(mut self) -> Self {
        self.mode = ListMode::Append;
        self
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Client-side cache and UI state for one paginated list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T> {
    pub items: Vec<T>,
    /// Always >= 1; within `1..=total_pages` once the server reported pages
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    /// A load other than a refresh is in flight
    pub loading: bool,
    /// A pull-to-refresh reload is in flight
    pub refreshing: bool,
    pub error: Option<String>,
}

impl<T> PageState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size,
            total_pages: 0,
            loading: false,
            refreshing: false,
            error: None,
        }
    }

    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.refreshing
    }

    /// Page numbers for the pagination control
    pub fn window(&self) -> Vec<u32> {
        page_window(self.page, self.total_pages)
    }

    /// Clamp `page` into the valid range for the current page count.
    pub(crate) fn clamp_page(&self, page: u32) -> u32 {
        if self.total_pages > 0 {
            page.clamp(1, self.total_pages)
        } else {
            page.max(1)
        }
    }
}
