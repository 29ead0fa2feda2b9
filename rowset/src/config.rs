//! Table configuration

use serde::Deserialize;
use serde::Serialize;
use vscroll::VirtualScrollConfig;

use crate::column::SortOrder;
use crate::error::{Error, Result};
use crate::selection::SelectionMode;

/// Behavior settings of a [`Table`](crate::Table).
///
/// # Example
///
/// ```
/// use rowset::{SelectionMode, TableConfig};
///
/// let config = TableConfig::default()
///     .with_selection(SelectionMode::Multiple)
///     .with_binary_state_sort(true)
///     .with_rows_per_page_options(vec![10, 25, 0]);
/// assert!(config.validate_rows_per_page(25).is_ok());
/// assert!(config.validate_rows_per_page(7).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Row selection mode.
    ///
    /// Default: `None`
    pub selection: SelectionMode,

    /// Header clicks only flip between ascending and descending.
    ///
    /// Default: false
    pub binary_state_sort: bool,

    /// Header click cycle for columns that do not set their own.
    ///
    /// Default: `Ad`
    pub column_sort_order: SortOrder,

    /// Page sizes offered to the user. `0` stands for all rows.
    ///
    /// Default: 5, 7, 10, 15, 20, 25, 50, 0
    pub rows_per_page_options: Vec<usize>,

    /// Render rows through a virtual window instead of all at once.
    ///
    /// Default: false
    pub virtual_scroll: bool,

    /// Settings of the virtual window.
    pub virtual_scroll_config: VirtualScrollConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            selection: SelectionMode::None,
            binary_state_sort: false,
            column_sort_order: SortOrder::Ad,
            rows_per_page_options: vec![5, 7, 10, 15, 20, 25, 50, 0],
            virtual_scroll: false,
            virtual_scroll_config: VirtualScrollConfig::default(),
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selection mode.
    pub fn with_selection(mut self, mode: SelectionMode) -> Self {
        self.selection = mode;
        self
    }

    /// Sets whether header clicks skip the unsorted state.
    pub fn with_binary_state_sort(mut self, binary: bool) -> Self {
        self.binary_state_sort = binary;
        self
    }

    /// Sets the default header click cycle.
    pub fn with_column_sort_order(mut self, order: SortOrder) -> Self {
        self.column_sort_order = order;
        self
    }

    /// Sets the offered page sizes.
    pub fn with_rows_per_page_options(mut self, options: Vec<usize>) -> Self {
        self.rows_per_page_options = options;
        self
    }

    /// Enables the virtual window with the given settings.
    pub fn with_virtual_scroll(mut self, config: VirtualScrollConfig) -> Self {
        self.virtual_scroll = true;
        self.virtual_scroll_config = config;
        self
    }

    /// Checks the virtual window settings.
    pub fn validate(&self) -> Result<()> {
        self.virtual_scroll_config.validate()?;
        Ok(())
    }

    /// Checks that `rows_per_page` is one of the offered page sizes.
    ///
    /// An empty option list accepts any value.
    pub fn validate_rows_per_page(&self, rows_per_page: usize) -> Result<()> {
        if self.rows_per_page_options.is_empty()
            || self.rows_per_page_options.contains(&rows_per_page)
        {
            Ok(())
        } else {
            Err(Error::InvalidRowsPerPage {
                value: rows_per_page,
                options: self.rows_per_page_options.clone(),
            })
        }
    }
}
