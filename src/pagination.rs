//! Pagination summary and control.
//!
//! [`PaginationInfo`] is a derived, read-only summary recomputed from the row
//! count and the store's page state. [`PaginationControl`] is pure
//! presentation over one such snapshot: it never recomputes bounds locally,
//! so it cannot drift from the authoritative summary.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The pagination slice of table state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page; always greater than zero.
    pub page_size: usize,
}

impl PageState {
    /// Create a page state. A zero page size is clamped to 1.
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(0, crate::table::DEFAULT_PAGE_SIZE)
    }
}

/// Derived, read-only pagination summary.
///
/// Recomputed whenever the (filtered) row count or the page state changes;
/// never mutated directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Total rows after filtering.
    pub total: usize,
    /// Number of pages (at least 1 even when empty).
    pub page_count: usize,
    /// Zero-based current page, clamped into range.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationInfo {
    /// Derive a summary from a row total and page state.
    pub fn derive(total: usize, page: PageState) -> Self {
        let page_size = page.page_size.max(1);
        let page_count = total.div_ceil(page_size).max(1);
        let current_page = page.page_index.min(page_count - 1);
        Self {
            total,
            page_count,
            current_page,
            page_size,
            has_next_page: current_page + 1 < page_count,
            has_previous_page: current_page > 0,
        }
    }

    /// First displayed item, one-based inclusive. Zero when empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.current_page * self.page_size + 1
        }
    }

    /// Last displayed item, one-based inclusive. Zero when empty.
    pub fn end_item(&self) -> usize {
        ((self.current_page + 1) * self.page_size).min(self.total)
    }

    /// Human-readable display range, e.g. `"21 to 23 of 23"`.
    pub fn display_range(&self) -> String {
        format!("{} to {} of {}", self.start_item(), self.end_item(), self.total)
    }
}

/// Plain-data pagination region of a rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub info: PaginationInfo,
    pub start_item: usize,
    pub end_item: usize,
    pub page_size_options: Vec<usize>,
}

type PageChangeFn = Arc<dyn Fn(usize) + Send + Sync>;

/// Interactive pagination control over one summary snapshot.
///
/// Navigation is gated strictly by `has_previous_page` / `has_next_page`
/// from the summary. Changing the page size does not reset the page index -
/// that responsibility belongs to the caller.
pub struct PaginationControl {
    info: PaginationInfo,
    page_size_options: Vec<usize>,
    on_page_change: Option<PageChangeFn>,
    on_page_size_change: Option<PageChangeFn>,
}

impl PaginationControl {
    /// Create a control over a summary snapshot.
    pub fn new(info: PaginationInfo) -> Self {
        Self {
            info,
            page_size_options: vec![10, 20, 50],
            on_page_change: None,
            on_page_size_change: None,
        }
    }

    /// Set the offered page sizes.
    pub fn page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Set the page-change callback.
    pub fn on_page_change(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_page_change = Some(Arc::new(f));
        self
    }

    /// Set the page-size-change callback.
    pub fn on_page_size_change(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_page_size_change = Some(Arc::new(f));
        self
    }

    /// The summary this control presents.
    pub fn info(&self) -> PaginationInfo {
        self.info
    }

    /// Produce the plain-data view of this control.
    pub fn view(&self) -> PaginationView {
        PaginationView {
            info: self.info,
            start_item: self.info.start_item(),
            end_item: self.info.end_item(),
            page_size_options: self.page_size_options.clone(),
        }
    }

    /// Navigate to the next page. No-op when `has_next_page` is false.
    pub fn next_page(&self) {
        if self.info.has_next_page
            && let Some(f) = &self.on_page_change
        {
            f(self.info.current_page + 1);
        }
    }

    /// Navigate to the previous page. No-op when `has_previous_page` is false.
    pub fn previous_page(&self) {
        if self.info.has_previous_page
            && let Some(f) = &self.on_page_change
        {
            f(self.info.current_page - 1);
        }
    }

    /// Navigate to the first page.
    pub fn first_page(&self) {
        if self.info.has_previous_page
            && let Some(f) = &self.on_page_change
        {
            f(0);
        }
    }

    /// Navigate to the last page.
    pub fn last_page(&self) {
        if self.info.has_next_page
            && let Some(f) = &self.on_page_change
        {
            f(self.info.page_count - 1);
        }
    }

    /// Navigate to a specific page, clamped into range.
    pub fn set_page(&self, page: usize) {
        if let Some(f) = &self.on_page_change {
            f(page.min(self.info.page_count - 1));
        }
    }

    /// Change the page size. Does not touch the page index.
    pub fn set_page_size(&self, size: usize) {
        if let Some(f) = &self.on_page_size_change {
            f(size.max(1));
        }
    }
}
