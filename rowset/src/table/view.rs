use serde::Serialize;

/// Snapshot of what a table displays right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView<'a, R> {
    /// Rows of the current page, filtered and sorted.
    pub rows: Vec<&'a R>,
    pub sort_by: Option<&'a str>,
    pub descending: bool,
    pub page: usize,
    pub pages_number: usize,
    pub is_first_page: bool,
    pub is_last_page: bool,
    /// Rows across all pages.
    pub rows_number: usize,
    /// Index of the first row of the page in the full (filtered) collection.
    pub first_row_index: usize,
    /// Index one past the last row of the page.
    pub last_row_index: usize,
}

impl<R> TableView<'_, R> {
    /// Whether the current page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
