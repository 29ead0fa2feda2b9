//! The table engine.
//!
//! A [`Table`] owns the rows and columns plus every piece of interactive
//! state (filter, sort, page, selection, expansion, virtual window) and runs
//! the stages in order:
//!
//! ```text
//! rows -> filter -> sort -> page -> (virtual window)
//! ```
//!
//! In server mode (`rows_number` set) the first three stages are delegated:
//! state changes produce a [`ServerRequest`] and the table keeps showing the
//! previous page until [`Table::apply_server_response`] delivers the next one.
//!
//! Every state change is queued as a [`TableEvent`] for the host to drain.

mod builder;
mod view;

pub use builder::TableBuilder;
pub use view::TableView;

use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use vscroll::{ScrollTarget, VirtualScroll};

use crate::column::{self, Column};
use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::events::TableEvent;
use crate::expansion::Expansion;
use crate::filter::{self, FilterMethod, FilterTerm};
use crate::key::{RowKey, RowKeyResolver};
use crate::pagination::{self, PageInfo, PaginationPatch, PaginationState};
use crate::request::{RequestId, ServerRequest};
use crate::selection::{Selection, SelectionDelta, SelectionMode};
use crate::sort::{self, SortMethod, SortState};

/// Headless data table.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use rowset::{Column, RowKeyResolver, Table, TableEvent, Value};
///
/// type Row = HashMap<String, Value>;
///
/// let rows: Vec<Row> = ["Mark", "John", "Joanna"]
///     .iter()
///     .enumerate()
///     .map(|(i, name)| {
///         HashMap::from([
///             ("id".to_string(), Value::from(i as i64)),
///             ("name".to_string(), Value::from(*name)),
///         ])
///     })
///     .collect();
///
/// let mut table = Table::<Row>::builder(vec![Column::by_name("name").sortable()])
///     .rows(rows)
///     .row_key(RowKeyResolver::field("id"))
///     .build();
///
/// table.set_filter("jo");
/// table.sort("name");
///
/// let names: Vec<String> = table.view().rows.iter().map(|r| r["name"].to_string()).collect();
/// assert_eq!(names, ["Joanna", "John"]);
/// assert!(matches!(table.drain_events().last(), Some(TableEvent::UpdatePagination(_))));
/// ```
pub struct Table<R> {
    config: TableConfig,
    columns: Vec<Column<R>>,
    /// Names of the columns to show; `None` shows all.
    visible: Option<HashSet<String>>,
    rows: Arc<[R]>,
    row_key: Option<RowKeyResolver<R>>,
    /// First row index of every key.
    key_index: HashMap<RowKey, usize>,
    filter: FilterTerm,
    filter_method: Option<FilterMethod<R>>,
    sort_method: Option<SortMethod<R>>,
    pagination: PaginationState,
    /// Indices into `rows` in display order, all pages.
    computed: Vec<usize>,
    selection: Selection,
    expansion: Expansion,
    virtual_scroll: Option<VirtualScroll>,
    /// Last issued request id.
    request_id: RequestId,
    pending_request: Option<ServerRequest<R>>,
    events: Vec<TableEvent<R>>,
}

impl<R: Clone + 'static> Table<R> {
    /// Start building a table with `columns`.
    pub fn builder(columns: Vec<Column<R>>) -> TableBuilder<R> {
        TableBuilder::new(columns)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// All columns, hidden ones included.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Columns to show: required ones plus those in the visible set.
    pub fn visible_columns(&self) -> Vec<&Column<R>> {
        self.columns
            .iter()
            .filter(|c| {
                c.is_required() || self.visible.as_ref().is_none_or(|set| set.contains(c.name()))
            })
            .collect()
    }

    /// The rows as supplied, unfiltered.
    pub fn rows(&self) -> &Arc<[R]> {
        &self.rows
    }

    pub fn filter(&self) -> &FilterTerm {
        &self.filter
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn sort_state(&self) -> SortState {
        self.pagination.sort_state()
    }

    /// Whether filtering, sorting and paging are delegated to the host.
    pub fn is_server_side(&self) -> bool {
        self.pagination.is_server_side()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    /// Key of `row`, `None` without a key resolver or for unkeyable rows.
    pub fn row_key(&self, row: &R) -> Option<RowKey> {
        self.row_key.as_ref()?.resolve(row)
    }

    /// The first row with `key`.
    pub fn row_by_key(&self, key: &RowKey) -> Option<&R> {
        self.key_index.get(key).map(|&i| &self.rows[i])
    }

    /// Filtered and sorted rows across all pages.
    pub fn computed_rows(&self) -> Vec<&R> {
        self.computed.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Paging facts of the current page.
    pub fn page_info(&self) -> PageInfo {
        let rows_number = match self.pagination.rows_number {
            Some(total) => total,
            None => self.computed.len(),
        };
        PageInfo::new(
            rows_number,
            self.pagination.page,
            self.pagination.rows_per_page,
        )
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<&R> {
        let range = if self.is_server_side() {
            0..self.computed.len()
        } else {
            pagination::page_range(
                self.computed.len(),
                self.pagination.page,
                self.pagination.rows_per_page,
            )
        };
        self.computed[range].iter().map(|&i| &self.rows[i]).collect()
    }

    /// Snapshot of the current page and its paging facts.
    pub fn view(&self) -> TableView<'_, R> {
        let info = self.page_info();
        TableView {
            rows: self.page_rows(),
            sort_by: self.pagination.sort_by.as_deref(),
            descending: self.pagination.descending,
            page: info.page,
            pages_number: info.pages_number,
            is_first_page: info.is_first_page,
            is_last_page: info.is_last_page,
            rows_number: info.rows_number,
            first_row_index: info.first_row_index,
            last_row_index: info.last_row_index,
        }
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TableEvent<R>> {
        self.pull_scroll_events();
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Rows and columns
    // -------------------------------------------------------------------------

    /// Replace the rows.
    ///
    /// Passing the same `Arc` again is a no-op.
    pub fn set_rows(&mut self, rows: impl Into<Arc<[R]>>) {
        let rows = rows.into();
        if Arc::ptr_eq(&rows, &self.rows) {
            log::trace!("rows unchanged, skipping recomputation");
            return;
        }
        self.rows = rows;
        self.refresh_rows();
        if !self.is_server_side() {
            self.fix_page();
        }
        self.sync_virtual_len();
    }

    /// Replace the columns, rejecting duplicate names.
    pub fn try_set_columns(&mut self, columns: Vec<Column<R>>) -> Result<()> {
        check_unique(&columns)?;
        self.apply_columns(columns);
        Ok(())
    }

    /// Replace the columns. Of columns sharing a name, the first one wins.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        let columns = dedupe_columns(columns);
        self.apply_columns(columns);
    }

    /// Show only the named columns (required columns always show).
    pub fn set_visible_columns<S: Into<String>>(&mut self, names: impl IntoIterator<Item = S>) {
        self.visible = Some(names.into_iter().map(Into::into).collect());
        self.refilter();
    }

    /// Show every column.
    pub fn show_all_columns(&mut self) {
        self.visible = None;
        self.refilter();
    }

    // -------------------------------------------------------------------------
    // Filter
    // -------------------------------------------------------------------------

    /// Change the filter term. Returns to the first page.
    pub fn set_filter(&mut self, term: impl Into<FilterTerm>) {
        let term = term.into();
        if term == self.filter {
            return;
        }
        log::debug!("filter: {:?}", term);
        self.filter = term;

        let mut next = self.pagination.clone();
        next.page = 1;
        if self.is_server_side() {
            self.send_request(next);
            return;
        }

        self.recompute();
        if next.same_request(&self.pagination) {
            self.sync_virtual_len();
        } else {
            self.commit_pagination(next);
        }
    }

    // -------------------------------------------------------------------------
    // Sort and pagination
    // -------------------------------------------------------------------------

    /// Header click on `column`: advance its sort cycle and go to page 1.
    pub fn try_sort(&mut self, column: &str) -> Result<()> {
        let col = self.sortable_column(column)?;
        let order = col.sort_order().unwrap_or(self.config.column_sort_order);
        let next = sort::next_sort_state(
            &self.pagination.sort_state(),
            column,
            order,
            self.config.binary_state_sort,
        );
        self.try_set_pagination(PaginationPatch::sort(next).page(1), false)
    }

    /// Like [`try_sort`](Self::try_sort); unknown or unsortable columns are
    /// logged and ignored.
    pub fn sort(&mut self, column: &str) {
        if let Err(err) = self.try_sort(column) {
            log::warn!("sort ignored: {}", err);
        }
    }

    /// Update paging and sort state.
    ///
    /// The page is clamped into range and reset to 1 when the page size
    /// changes. In server mode this emits a request instead of changing the
    /// state; `force_request` emits one even when nothing changed.
    pub fn try_set_pagination(&mut self, patch: PaginationPatch, force_request: bool) -> Result<()> {
        if let Some(rows_per_page) = patch.rows_per_page {
            self.config.validate_rows_per_page(rows_per_page)?;
        }
        if let Some(Some(name)) = &patch.sort_by {
            self.sortable_column(name)?;
        }

        let mut next = self.pagination.merged(&patch);
        if patch.page.is_none() && next.rows_per_page != self.pagination.rows_per_page {
            next.page = 1;
        }
        let rows_number = next.rows_number.unwrap_or(self.computed.len());
        next.page = pagination::clamp_page(next.page, rows_number, next.rows_per_page);

        if self.is_server_side() {
            if force_request || !next.same_request(&self.pagination) {
                self.send_request(next);
            }
            return Ok(());
        }

        if !next.same_request(&self.pagination) {
            self.commit_pagination(next);
        }
        Ok(())
    }

    /// Like [`try_set_pagination`](Self::try_set_pagination); invalid
    /// patches are logged and ignored.
    pub fn set_pagination(&mut self, patch: PaginationPatch, force_request: bool) {
        if let Err(err) = self.try_set_pagination(patch, force_request) {
            log::warn!("pagination change ignored: {}", err);
        }
    }

    pub fn first_page(&mut self) {
        if !self.page_info().is_first_page {
            self.set_pagination(PaginationPatch::new().page(1), false);
        }
    }

    pub fn prev_page(&mut self) {
        let info = self.page_info();
        if !info.is_first_page {
            self.set_pagination(PaginationPatch::new().page(info.page - 1), false);
        }
    }

    pub fn next_page(&mut self) {
        let info = self.page_info();
        if !info.is_last_page {
            self.set_pagination(PaginationPatch::new().page(info.page + 1), false);
        }
    }

    pub fn last_page(&mut self) {
        let info = self.page_info();
        if !info.is_last_page {
            self.set_pagination(PaginationPatch::new().page(info.pages_number), false);
        }
    }

    // -------------------------------------------------------------------------
    // Server mode
    // -------------------------------------------------------------------------

    /// Whether `id` belongs to the most recent request. Responses to older
    /// requests should be dropped.
    pub fn is_current_request(&self, id: RequestId) -> bool {
        id == self.request_id
    }

    /// The request awaiting a response.
    pub fn pending_request(&self) -> Option<&ServerRequest<R>> {
        self.pending_request.as_ref()
    }

    /// Deliver the page answering the latest request.
    ///
    /// `rows` are shown as-is; `rows_number` is the total across all pages.
    pub fn apply_server_response(&mut self, rows: impl Into<Arc<[R]>>, rows_number: usize) {
        let mut next = match self.pending_request.take() {
            Some(request) => request.pagination,
            None => {
                log::warn!("server response without a pending request");
                self.pagination.clone()
            }
        };
        next.rows_number = Some(rows_number);
        next.page = pagination::clamp_page(next.page, rows_number, next.rows_per_page);

        self.rows = rows.into();
        self.pagination = next;
        self.refresh_rows();
        log::debug!(
            "server page {} applied ({} rows of {})",
            self.pagination.page,
            self.rows.len(),
            rows_number
        );
        self.events
            .push(TableEvent::UpdatePagination(self.pagination.clone()));
        self.sync_virtual_len();
    }

    /// Re-request the current page from the host.
    pub fn request_server_data(&mut self) {
        if self.is_server_side() {
            self.send_request(self.pagination.clone());
        } else {
            log::warn!("server data requested while in client mode");
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn is_row_selected(&self, key: &RowKey) -> bool {
        self.selection.is_selected(key)
    }

    /// Selected keys in selection order.
    pub fn selected_keys(&self) -> &[RowKey] {
        self.selection.keys()
    }

    /// Selected rows that are present in the current row set.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.selection
            .keys()
            .iter()
            .filter_map(|key| self.row_by_key(key))
            .collect()
    }

    pub fn try_toggle_row(&mut self, key: impl Into<RowKey>) -> Result<()> {
        let delta = self.selection.try_toggle(key.into())?;
        self.commit_selection(delta);
        Ok(())
    }

    /// Flip the selection of one row.
    pub fn toggle_row(&mut self, key: impl Into<RowKey>) {
        if let Err(err) = self.try_toggle_row(key) {
            log::warn!("row toggle ignored: {}", err);
        }
    }

    /// Make `keys` the whole selection.
    pub fn try_set_selected(&mut self, keys: impl IntoIterator<Item = RowKey>) -> Result<()> {
        let keys: Vec<RowKey> = keys.into_iter().collect();
        if self.selection.mode() == SelectionMode::None && !keys.is_empty() {
            return Err(Error::SelectionDisabled);
        }
        let delta = self.selection.replace(keys);
        self.commit_selection(delta);
        Ok(())
    }

    pub fn set_selected(&mut self, keys: impl IntoIterator<Item = RowKey>) {
        if let Err(err) = self.try_set_selected(keys) {
            log::warn!("selection change ignored: {}", err);
        }
    }

    pub fn clear_selection(&mut self) {
        let delta = self.selection.clear();
        self.commit_selection(delta);
    }

    /// Change the selection mode, dropping keys the new mode cannot hold.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.config.selection = mode;
        let delta = self.selection.set_mode(mode);
        self.commit_selection(delta);
    }

    /// Whether every keyed row of the current page is selected.
    pub fn all_rows_selected(&self) -> bool {
        let keys = self.page_keys();
        !keys.is_empty() && keys.iter().all(|k| self.selection.is_selected(k))
    }

    /// Whether some, but not all, keyed rows of the current page are selected.
    pub fn some_rows_selected(&self) -> bool {
        let keys = self.page_keys();
        let selected = keys.iter().filter(|k| self.selection.is_selected(k)).count();
        selected > 0 && selected < keys.len()
    }

    /// Header checkbox: deselect the page's rows if any of them is selected,
    /// otherwise select them all. Only meaningful in `Multiple` mode.
    pub fn try_toggle_all_on_page(&mut self) -> Result<()> {
        match self.selection.mode() {
            SelectionMode::None => return Err(Error::SelectionDisabled),
            SelectionMode::Single => {
                log::debug!("select-all is not available in single selection mode");
                return Ok(());
            }
            SelectionMode::Multiple => {}
        }

        let keys = self.page_keys();
        let delta = if keys.iter().any(|k| self.selection.is_selected(k)) {
            self.selection.deselect_many(&keys)
        } else {
            self.selection.select_many(keys)
        };
        self.commit_selection(delta);
        Ok(())
    }

    pub fn toggle_all_on_page(&mut self) {
        if let Err(err) = self.try_toggle_all_on_page() {
            log::warn!("select-all ignored: {}", err);
        }
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    pub fn is_row_expanded(&self, key: &RowKey) -> bool {
        self.expansion.is_expanded(key)
    }

    /// Make `keys` the expanded set.
    pub fn set_expanded(&mut self, keys: impl IntoIterator<Item = RowKey>) {
        if self.expansion.set(keys) {
            self.events
                .push(TableEvent::UpdateExpanded(self.expansion.keys().to_vec()));
        }
    }

    /// Open or close one row.
    pub fn toggle_expanded(&mut self, key: impl Into<RowKey>) {
        self.expansion.toggle(key.into());
        self.events
            .push(TableEvent::UpdateExpanded(self.expansion.keys().to_vec()));
    }

    // -------------------------------------------------------------------------
    // Virtual scroll
    // -------------------------------------------------------------------------

    /// The virtual window engine, when enabled.
    pub fn virtual_scroll(&self) -> Option<&VirtualScroll> {
        self.virtual_scroll.as_ref()
    }

    /// Rows of the current page inside the virtual window, with their
    /// page-relative index. Without virtual scrolling this is the whole page.
    pub fn rows_in_window(&self) -> Vec<(usize, &R)> {
        let rows = self.page_rows().into_iter().enumerate();
        let Some(vs) = &self.virtual_scroll else {
            return rows.collect();
        };
        match vs.window() {
            Some(window) => rows.skip(window.from).take(window.len()).collect(),
            None => Vec::new(),
        }
    }

    /// Report the viewport size of the scroll container.
    pub fn set_viewport(&mut self, size: u32) {
        if let Some(vs) = self.virtual_scroll_mut("set_viewport") {
            vs.set_viewport(size);
        }
        self.pull_scroll_events();
    }

    /// Report a scroll offset. The window follows after the debounce delay.
    pub fn on_scroll(&mut self, offset: u32) {
        if let Some(vs) = self.virtual_scroll_mut("on_scroll") {
            vs.on_scroll(offset);
        }
        self.pull_scroll_events();
    }

    /// Recompute the window at the latest reported offset; `immediately`
    /// skips the debounce delay.
    pub fn trigger_scroll(&mut self, immediately: bool) {
        if let Some(vs) = self.virtual_scroll_mut("trigger") {
            vs.trigger(immediately);
        }
        self.pull_scroll_events();
    }

    /// Apply a debounced scroll whose delay has passed.
    pub fn poll_scroll(&mut self) -> bool {
        let applied = self.virtual_scroll.as_mut().is_some_and(|vs| vs.poll());
        self.pull_scroll_events();
        applied
    }

    /// Wait for a debounced scroll and apply it.
    pub async fn settle_scroll(&mut self) -> bool {
        let Some(vs) = self.virtual_scroll.as_mut() else {
            return false;
        };
        let applied = vs.settle().await;
        self.pull_scroll_events();
        applied
    }

    /// Record measured row sizes, starting at page-relative index `from`.
    pub fn measure_rows(&mut self, from: usize, sizes: &[u32]) {
        if let Some(vs) = self.virtual_scroll_mut("measure_rows") {
            vs.measure(from, sizes);
        }
    }

    /// Scroll a page-relative row index into the viewport.
    pub fn scroll_to(&mut self, index: usize, target: ScrollTarget) {
        if let Some(vs) = self.virtual_scroll_mut("scroll_to") {
            vs.scroll_to(index, target);
        }
        self.pull_scroll_events();
    }

    /// Recompute the window, keeping measured sizes; optionally re-anchor at
    /// `index`.
    pub fn refresh_virtual_scroll(&mut self, index: Option<usize>) {
        if let Some(vs) = self.virtual_scroll_mut("refresh") {
            vs.refresh(index);
        }
        self.pull_scroll_events();
    }

    /// Forget measured sizes and return to the top.
    pub fn reset_virtual_scroll(&mut self) {
        if let Some(vs) = self.virtual_scroll_mut("reset") {
            vs.reset();
        }
        self.pull_scroll_events();
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn virtual_scroll_mut(&mut self, op: &str) -> Option<&mut VirtualScroll> {
        if self.virtual_scroll.is_none() {
            log::warn!("{}: virtual scroll is disabled", op);
        }
        self.virtual_scroll.as_mut()
    }

    fn pull_scroll_events(&mut self) {
        if let Some(vs) = self.virtual_scroll.as_mut() {
            self.events
                .extend(vs.drain_events().into_iter().map(TableEvent::VirtualScroll));
        }
    }

    fn sync_virtual_len(&mut self) {
        let len = self.page_rows().len();
        if let Some(vs) = self.virtual_scroll.as_mut() {
            vs.set_len(len);
        }
        self.pull_scroll_events();
    }

    fn sortable_column(&self, name: &str) -> Result<&Column<R>> {
        let column = self
            .columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        if !column.is_sortable() {
            return Err(Error::ColumnNotSortable(name.to_string()));
        }
        Ok(column)
    }

    /// Install new columns. A sort on a column that is gone or no longer
    /// sortable is cleared.
    fn apply_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
        let stale = self
            .pagination
            .sort_by
            .clone()
            .filter(|name| self.sortable_column(name).is_err());
        let Some(name) = stale else {
            self.refilter();
            return;
        };

        log::warn!("clearing sort by `{}`: column removed or not sortable", name);
        let mut next = self.pagination.clone();
        next.sort_by = None;
        next.descending = false;
        next.page = 1;
        if self.is_server_side() {
            self.refilter();
            self.send_request(next);
        } else {
            self.commit_pagination(next);
        }
    }

    /// Recompute after a change of the filtering columns.
    fn refilter(&mut self) {
        self.recompute();
        if !self.is_server_side() {
            self.fix_page();
        }
        self.sync_virtual_len();
    }

    /// Rebuild the key index and the display order.
    fn refresh_rows(&mut self) {
        self.key_index.clear();
        if let Some(resolver) = &self.row_key {
            for (i, row) in self.rows.iter().enumerate() {
                let Some(key) = resolver.resolve(row) else {
                    continue;
                };
                match self.key_index.entry(key) {
                    Entry::Vacant(entry) => {
                        entry.insert(i);
                    }
                    Entry::Occupied(entry) => {
                        log::debug!("duplicate row key {}, keeping the first row", entry.key());
                    }
                }
            }
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.computed = self.compute_indices();
    }

    fn compute_indices(&self) -> Vec<usize> {
        if self.is_server_side() {
            return (0..self.rows.len()).collect();
        }

        let mut rows: Vec<(usize, &R)> = self.rows.iter().enumerate().collect();

        if !self.filter.is_empty() {
            let columns: Vec<&Column<R>> = self
                .visible_columns()
                .into_iter()
                .filter(|c| c.is_filterable())
                .collect();
            rows = match &self.filter_method {
                Some(method) => method(rows, &self.filter, &columns),
                None => filter::filter(rows, &self.filter, &columns),
            };
        }

        if let Some(sort_by) = self.pagination.sort_by.as_deref() {
            let descending = self.pagination.descending;
            rows = match &self.sort_method {
                Some(method) => method(rows, sort_by, descending, &self.columns),
                None => sort::sort(rows, Some(sort_by), descending, &self.columns),
            };
        }

        positions(self.rows.len(), rows)
    }

    /// Pull the page back into range after the row count shrank.
    fn fix_page(&mut self) {
        let pages = pagination::pages_number(self.computed.len(), self.pagination.rows_per_page);
        if self.pagination.page > pages {
            let mut next = self.pagination.clone();
            next.page = pages;
            self.commit_pagination(next);
        }
    }

    /// Store a client-side pagination state and announce it.
    fn commit_pagination(&mut self, next: PaginationState) {
        let resort = next.sort_by != self.pagination.sort_by
            || next.descending != self.pagination.descending;
        self.pagination = next;
        if resort {
            self.recompute();
        }
        self.pagination.page = pagination::clamp_page(
            self.pagination.page,
            self.computed.len(),
            self.pagination.rows_per_page,
        );
        log::debug!(
            "pagination: page {} x {}, sort {:?} {}",
            self.pagination.page,
            self.pagination.rows_per_page,
            self.pagination.sort_by,
            if self.pagination.descending { "desc" } else { "asc" }
        );
        self.events
            .push(TableEvent::UpdatePagination(self.pagination.clone()));
        self.sync_virtual_len();
    }

    fn send_request(&mut self, mut pagination: PaginationState) {
        pagination.rows_number = self.pagination.rows_number;
        self.request_id = self.request_id.next();
        let request = ServerRequest {
            id: self.request_id,
            pagination,
            filter: self.filter.clone(),
            cell_value: column::cell_value::<R>,
        };
        log::debug!(
            "server request {}: page {}, {} per page",
            request.id,
            request.pagination.page,
            request.pagination.rows_per_page
        );
        self.pending_request = Some(request.clone());
        self.events.push(TableEvent::Request(request));
    }

    /// Announce a selection change: removals, additions, then the final set.
    fn commit_selection(&mut self, delta: SelectionDelta) {
        if delta.is_empty() {
            return;
        }
        let SelectionDelta { removed, added } = delta;
        if !removed.is_empty() {
            let rows = self.rows_for_keys(&removed);
            self.events.push(TableEvent::Selection {
                rows,
                keys: removed,
                added: false,
            });
        }
        if !added.is_empty() {
            let rows = self.rows_for_keys(&added);
            self.events.push(TableEvent::Selection {
                rows,
                keys: added,
                added: true,
            });
        }
        self.events
            .push(TableEvent::UpdateSelected(self.selection.keys().to_vec()));
    }

    fn rows_for_keys(&self, keys: &[RowKey]) -> Vec<R> {
        keys.iter()
            .filter_map(|key| self.row_by_key(key))
            .cloned()
            .collect()
    }

    /// Keys of the keyable rows on the current page.
    fn page_keys(&self) -> Vec<RowKey> {
        self.page_rows()
            .into_iter()
            .filter_map(|row| self.row_key(row))
            .collect()
    }
}

/// Positions carried by the rows a stage handed back.
///
/// Positions outside the table are dropped.
fn positions<R>(len: usize, picked: Vec<(usize, &R)>) -> Vec<usize> {
    let total = picked.len();
    let indices: Vec<usize> = picked
        .into_iter()
        .map(|(index, _)| index)
        .filter(|index| *index < len)
        .collect();
    if indices.len() != total {
        log::warn!(
            "{} rows returned by a custom stage are not part of the table",
            total - indices.len()
        );
    }
    indices
}

fn check_unique<R>(columns: &[Column<R>]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.name()) {
            return Err(Error::DuplicateColumn(column.name().to_string()));
        }
    }
    Ok(())
}

fn dedupe_columns<R>(columns: Vec<Column<R>>) -> Vec<Column<R>> {
    let mut seen = HashSet::new();
    columns
        .into_iter()
        .filter(|column| {
            let fresh = seen.insert(column.name().to_string());
            if !fresh {
                log::warn!("{}; keeping the first", Error::DuplicateColumn(column.name().to_string()));
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_follow_stage_order() {
        let rows = vec![10, 20, 30, 40];
        let picked = vec![(2, &rows[2]), (0, &rows[0])];
        assert_eq!(positions(rows.len(), picked), vec![2, 0]);
    }

    #[test]
    fn test_positions_drop_out_of_range() {
        let rows = vec![1, 2];
        assert_eq!(positions(rows.len(), vec![(1, &rows[1]), (7, &rows[0])]), vec![1]);
    }

    #[test]
    fn test_positions_of_zero_sized_rows() {
        let rows = vec![(), (), ()];
        let picked = vec![(2, &rows[2]), (1, &rows[1])];
        assert_eq!(positions(rows.len(), picked), vec![2, 1]);
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let columns: Vec<Column<i32>> = vec![
            Column::computed("a", |v: &i32| (*v).into()).with_label("first"),
            Column::computed("a", |v: &i32| (*v).into()).with_label("second"),
        ];
        assert!(check_unique(&columns).is_err());
        let columns = dedupe_columns(columns);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].label(), "first");
    }
}
