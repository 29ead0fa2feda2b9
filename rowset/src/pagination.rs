//! Pagination stage.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

use crate::sort::SortState;

/// Paging state of a table.
///
/// `rows_number` switches the table into server mode: the host owns
/// filtering, sorting and paging and reports the total row count here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationState {
    /// 1-based page number.
    pub page: usize,
    /// Rows per page, `0` for all rows on one page.
    pub rows_per_page: usize,
    pub sort_by: Option<String>,
    pub descending: bool,
    /// Total row count reported by the server.
    pub rows_number: Option<usize>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            rows_per_page: 5,
            sort_by: None,
            descending: false,
            rows_number: None,
        }
    }
}

impl PaginationState {
    pub fn is_server_side(&self) -> bool {
        self.rows_number.is_some()
    }

    pub fn sort_state(&self) -> SortState {
        SortState {
            sort_by: self.sort_by.clone(),
            descending: self.descending,
        }
    }

    /// A copy with the fields set in `patch` replaced.
    pub fn merged(&self, patch: &PaginationPatch) -> Self {
        Self {
            page: patch.page.unwrap_or(self.page),
            rows_per_page: patch.rows_per_page.unwrap_or(self.rows_per_page),
            sort_by: patch.sort_by.clone().unwrap_or_else(|| self.sort_by.clone()),
            descending: patch.descending.unwrap_or(self.descending),
            rows_number: self.rows_number,
        }
    }

    /// Whether both states request the same page. `rows_number` is ignored.
    pub(crate) fn same_request(&self, other: &Self) -> bool {
        self.page == other.page
            && self.rows_per_page == other.rows_per_page
            && self.sort_by == other.sort_by
            && self.descending == other.descending
    }
}

/// Partial update of a [`PaginationState`].
///
/// # Example
///
/// ```
/// use rowset::PaginationPatch;
///
/// let patch = PaginationPatch::new().page(2).sort_by(Some("name")).descending(true);
/// assert_eq!(patch.page, Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationPatch {
    pub page: Option<usize>,
    pub rows_per_page: Option<usize>,
    /// `Some(None)` clears the sort column.
    pub sort_by: Option<Option<String>>,
    pub descending: Option<bool>,
}

impl PaginationPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = Some(rows_per_page);
        self
    }

    pub fn sort_by(mut self, sort_by: Option<&str>) -> Self {
        self.sort_by = Some(sort_by.map(str::to_string));
        self
    }

    pub fn descending(mut self, descending: bool) -> Self {
        self.descending = Some(descending);
        self
    }

    /// Patch applying a sort state.
    pub fn sort(state: SortState) -> Self {
        Self {
            sort_by: Some(state.sort_by),
            descending: Some(state.descending),
            ..Self::default()
        }
    }
}

/// Number of pages for `rows_number` rows. Never less than 1.
pub fn pages_number(rows_number: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 1;
    }
    rows_number.div_ceil(rows_per_page).max(1)
}

/// Clamp `page` into `[1, pages_number]`.
pub fn clamp_page(page: usize, rows_number: usize, rows_per_page: usize) -> usize {
    page.clamp(1, pages_number(rows_number, rows_per_page))
}

/// Index range of `page` in a collection of `rows_number` rows.
///
/// The page is clamped first, so out-of-range pages yield the first or last
/// page.
pub fn page_range(rows_number: usize, page: usize, rows_per_page: usize) -> Range<usize> {
    if rows_per_page == 0 {
        return 0..rows_number;
    }
    let page = clamp_page(page, rows_number, rows_per_page);
    let start = ((page - 1) * rows_per_page).min(rows_number);
    let end = (start + rows_per_page).min(rows_number);
    start..end
}

/// Rows of `page`.
pub fn paginate<T>(rows: &[T], page: usize, rows_per_page: usize) -> &[T] {
    &rows[page_range(rows.len(), page, rows_per_page)]
}

/// Derived paging facts for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Current (clamped) page.
    pub page: usize,
    pub pages_number: usize,
    pub is_first_page: bool,
    pub is_last_page: bool,
    /// Index of the first row of the page in the full collection.
    pub first_row_index: usize,
    /// Index one past the last row of the page.
    pub last_row_index: usize,
    /// Total number of rows across all pages.
    pub rows_number: usize,
}

impl PageInfo {
    pub fn new(rows_number: usize, page: usize, rows_per_page: usize) -> Self {
        let pages_number = pages_number(rows_number, rows_per_page);
        let page = page.clamp(1, pages_number);
        let range = page_range(rows_number, page, rows_per_page);
        Self {
            page,
            pages_number,
            is_first_page: page == 1,
            is_last_page: page == pages_number,
            first_row_index: range.start,
            last_row_index: range.end,
            rows_number,
        }
    }
}
