use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use vscroll::VirtualScroll;

use super::{Table, check_unique, dedupe_columns};
use crate::column::Column;
use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::expansion::Expansion;
use crate::filter::{FilterMethod, FilterTerm};
use crate::key::{RowKey, RowKeyResolver};
use crate::pagination::{self, PaginationState};
use crate::request::RequestId;
use crate::selection::Selection;
use crate::sort::{SortMethod, SortState};

/// Builder for [`Table`].
///
/// # Example
///
/// ```
/// use rowset::{Column, SelectionMode, SortState, Table, TableConfig};
///
/// let table = Table::<(u32, &str)>::builder(vec![
///     Column::computed("name", |row: &(u32, &str)| row.1.into()).sortable(),
/// ])
/// .rows(vec![(1, "b"), (2, "a")])
/// .row_key_fn(|row| Some(i64::from(row.0).into()))
/// .config(TableConfig::default().with_selection(SelectionMode::Single))
/// .sort(SortState::ascending("name"))
/// .build();
///
/// assert_eq!(table.view().rows[0].1, "a");
/// ```
pub struct TableBuilder<R> {
    columns: Vec<Column<R>>,
    rows: Arc<[R]>,
    row_key: Option<RowKeyResolver<R>>,
    config: TableConfig,
    pagination: PaginationState,
    filter: FilterTerm,
    filter_method: Option<FilterMethod<R>>,
    sort_method: Option<SortMethod<R>>,
    visible: Option<HashSet<String>>,
    selected: Vec<RowKey>,
    expanded: Vec<RowKey>,
}

impl<R: Clone + 'static> TableBuilder<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new().into(),
            row_key: None,
            config: TableConfig::default(),
            pagination: PaginationState::default(),
            filter: FilterTerm::default(),
            filter_method: None,
            sort_method: None,
            visible: None,
            selected: Vec::new(),
            expanded: Vec::new(),
        }
    }

    pub fn rows(mut self, rows: impl Into<Arc<[R]>>) -> Self {
        self.rows = rows.into();
        self
    }

    /// How rows are identified for selection and expansion.
    pub fn row_key(mut self, key: impl Into<RowKeyResolver<R>>) -> Self {
        self.row_key = Some(key.into());
        self
    }

    /// Identify rows with a function.
    pub fn row_key_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Option<RowKey> + Send + Sync + 'static,
    {
        self.row_key = Some(RowKeyResolver::from_fn(f));
        self
    }

    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial paging state. A `rows_number` puts the table in server mode.
    pub fn pagination(mut self, pagination: PaginationState) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.pagination.rows_per_page = rows_per_page;
        self
    }

    /// Initial sort.
    pub fn sort(mut self, sort: SortState) -> Self {
        self.pagination.sort_by = sort.sort_by;
        self.pagination.descending = sort.descending;
        self
    }

    /// Delegate filtering, sorting and paging to the host, which reports
    /// `rows_number` rows in total.
    pub fn server_side(mut self, rows_number: usize) -> Self {
        self.pagination.rows_number = Some(rows_number);
        self
    }

    pub fn filter(mut self, term: impl Into<FilterTerm>) -> Self {
        self.filter = term.into();
        self
    }

    /// Replace the default filter algorithm.
    pub fn filter_method<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(Vec<(usize, &'a R)>, &FilterTerm, &[&Column<R>]) -> Vec<(usize, &'a R)>
            + Send
            + Sync
            + 'static,
    {
        self.filter_method = Some(Arc::new(f));
        self
    }

    /// Replace the default sort stage.
    pub fn sort_method<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(Vec<(usize, &'a R)>, &str, bool, &[Column<R>]) -> Vec<(usize, &'a R)>
            + Send
            + Sync
            + 'static,
    {
        self.sort_method = Some(Arc::new(f));
        self
    }

    /// Show only the named columns (required columns always show).
    pub fn visible_columns<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.visible = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Initially selected keys.
    pub fn selected(mut self, keys: impl IntoIterator<Item = RowKey>) -> Self {
        self.selected = keys.into_iter().collect();
        self
    }

    /// Initially expanded keys.
    pub fn expanded(mut self, keys: impl IntoIterator<Item = RowKey>) -> Self {
        self.expanded = keys.into_iter().collect();
        self
    }

    /// Build the table, rejecting inconsistent settings.
    pub fn try_build(self) -> Result<Table<R>> {
        check_unique(&self.columns)?;
        self.config.validate()?;
        self.config
            .validate_rows_per_page(self.pagination.rows_per_page)?;
        if let Some(name) = &self.pagination.sort_by {
            let column = self
                .columns
                .iter()
                .find(|c| c.name() == name)
                .ok_or_else(|| Error::UnknownColumn(name.clone()))?;
            if !column.is_sortable() {
                return Err(Error::ColumnNotSortable(name.clone()));
            }
        }
        Ok(self.assemble())
    }

    /// Build the table. Inconsistent settings are logged and corrected:
    /// duplicate columns keep the first, an invalid initial sort is dropped.
    pub fn build(mut self) -> Table<R> {
        self.columns = dedupe_columns(self.columns);
        if let Err(err) = self
            .config
            .validate_rows_per_page(self.pagination.rows_per_page)
        {
            log::warn!("{}", err);
        }
        if let Some(name) = &self.pagination.sort_by {
            let sortable = self
                .columns
                .iter()
                .any(|c| c.name() == name && c.is_sortable());
            if !sortable {
                log::warn!("initial sort by `{}` dropped: no such sortable column", name);
                self.pagination.sort_by = None;
                self.pagination.descending = false;
            }
        }
        self.assemble()
    }

    fn assemble(self) -> Table<R> {
        let mut selection = Selection::new(self.config.selection);
        selection.select_many(self.selected);
        let mut expansion = Expansion::new();
        expansion.set(self.expanded);

        let virtual_scroll = self
            .config
            .virtual_scroll
            .then(|| VirtualScroll::new(self.config.virtual_scroll_config.clone(), 0));

        let mut pagination = self.pagination;
        pagination.page = pagination.page.max(1);

        let mut table = Table {
            config: self.config,
            columns: self.columns,
            visible: self.visible,
            rows: self.rows,
            row_key: self.row_key,
            key_index: HashMap::new(),
            filter: self.filter,
            filter_method: self.filter_method,
            sort_method: self.sort_method,
            pagination,
            computed: Vec::new(),
            selection,
            expansion,
            virtual_scroll,
            request_id: RequestId::new(0),
            pending_request: None,
            events: Vec::new(),
        };

        table.refresh_rows();
        if !table.is_server_side() {
            table.pagination.page = pagination::clamp_page(
                table.pagination.page,
                table.computed.len(),
                table.pagination.rows_per_page,
            );
        }
        let len = table.page_rows().len();
        if let Some(vs) = table.virtual_scroll.as_mut() {
            vs.set_len(len);
            vs.drain_events();
        }
        log::debug!(
            "table built: {} columns, {} rows",
            table.columns.len(),
            table.rows.len()
        );
        table
    }
}
