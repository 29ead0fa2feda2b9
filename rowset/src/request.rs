//! Server-side data requests.

use std::fmt;

use serde::Serialize;

use crate::column::Column;
use crate::filter::FilterTerm;
use crate::pagination::PaginationState;

/// Identifier of a server request. Later requests have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Asks the host for one page of rows in server mode.
///
/// The host filters, sorts and pages its data source as described and
/// answers with [`Table::apply_server_response`](crate::Table::apply_server_response).
/// Serializes to `{ "id", "pagination", "filter" }`.
#[derive(Serialize)]
#[serde(bound = "")]
pub struct ServerRequest<R> {
    pub id: RequestId,
    /// The requested page, sort and page size.
    pub pagination: PaginationState,
    pub filter: FilterTerm,
    /// Display text of a cell, for hosts that filter on the same strings the
    /// table shows.
    #[serde(skip)]
    pub cell_value: fn(&Column<R>, &R) -> String,
}

impl<R> Clone for ServerRequest<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            pagination: self.pagination.clone(),
            filter: self.filter.clone(),
            cell_value: self.cell_value,
        }
    }
}

impl<R> fmt::Debug for ServerRequest<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerRequest")
            .field("id", &self.id)
            .field("pagination", &self.pagination)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<R> PartialEq for ServerRequest<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.pagination == other.pagination && self.filter == other.filter
    }
}
