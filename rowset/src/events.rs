//! Events queued by a [`Table`](crate::Table).

use vscroll::VirtualScrollEvent;

use crate::key::RowKey;
use crate::pagination::PaginationState;
use crate::request::ServerRequest;

/// Something the host should react to.
///
/// Events accumulate inside the table and are taken with
/// [`Table::drain_events`](crate::Table::drain_events).
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<R> {
    /// Server mode needs a new page.
    Request(ServerRequest<R>),
    /// Rows were selected (`added`) or deselected. A single-mode replacement
    /// produces a removal followed by an addition.
    Selection {
        rows: Vec<R>,
        keys: Vec<RowKey>,
        added: bool,
    },
    /// The virtual window moved.
    VirtualScroll(VirtualScrollEvent),
    /// The client-side pagination state changed.
    UpdatePagination(PaginationState),
    /// Final selected keys after a selection change.
    UpdateSelected(Vec<RowKey>),
    /// Final expanded keys after an expansion change.
    UpdateExpanded(Vec<RowKey>),
}
