//! Headless tabular data engine.
//!
//! `rowset` is the data layer behind a data table: row identity, filtering,
//! sorting, pagination, selection, expansion and virtual windowing, in both
//! client-side and server-delegated modes. It renders nothing; hosts feed it
//! rows and user intents and read back what to display plus a queue of
//! [`TableEvent`]s.
//!
//! The stages are usable on their own:
//!
//! - [`filter()`] / [`fuzzy_filter`] - reduce rows to those matching a term
//! - [`sort()`] / [`next_sort_state`] - order rows by a column, header click cycle
//! - [`paginate`] / [`PageInfo`] - slice an ordered collection into pages
//! - [`Selection`] / [`Expansion`] - key sets with none/single/multiple semantics
//!
//! [`Table`] composes them and embeds a [`VirtualScroll`] from the
//! [`vscroll`] crate.

mod column;
mod config;
mod error;
mod events;
mod expansion;
mod filter;
mod key;
mod pagination;
mod request;
mod selection;
mod sort;
mod table;
mod value;

pub use column::{Align, Column, Comparator, Field, Formatter, Getter, SortOrder, cell_value};
pub use config::TableConfig;
pub use error::{Error, Result};
pub use events::TableEvent;
pub use expansion::Expansion;
pub use filter::{FilterMethod, FilterTerm, filter, fuzzy_filter};
pub use key::{KeyFn, RowKey, RowKeyResolver, RowKeySpec};
pub use pagination::{
    PageInfo, PaginationPatch, PaginationState, clamp_page, page_range, pages_number, paginate,
};
pub use request::{RequestId, ServerRequest};
pub use selection::{Selection, SelectionDelta, SelectionMode};
pub use sort::{SortMethod, SortState, default_compare, next_sort_state, sort};
pub use table::{Table, TableBuilder, TableView};
pub use value::{Record, RowRef, Value};

pub use vscroll;
pub use vscroll::{
    Direction, Edge, ScrollTarget, VirtualScroll, VirtualScrollConfig, VirtualScrollEvent,
    VirtualWindow,
};
