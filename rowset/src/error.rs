//! Error types for table configuration and state changes.

/// Anomalies reported by the `try_*` methods of [`Table`](crate::Table) and by
/// [`TableConfig::validate`](crate::TableConfig::validate).
///
/// The plain imperative methods log these with `log::warn!` and fall back
/// instead of returning them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No column with this name exists.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The column exists but cannot be sorted.
    #[error("column is not sortable: {0}")]
    ColumnNotSortable(String),

    /// Two columns share a name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// The rows-per-page value is not one of the configured options.
    #[error("rows per page {value} is not one of the options {options:?}")]
    InvalidRowsPerPage {
        value: usize,
        options: Vec<usize>,
    },

    /// Selection was changed while the selection mode is `None`.
    #[error("selection is disabled")]
    SelectionDisabled,

    #[error(transparent)]
    VirtualScroll(#[from] vscroll::Error),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
