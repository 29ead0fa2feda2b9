//! Filter stage.

use std::sync::Arc;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::value::RowRef;

/// What rows are filtered by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterTerm {
    /// Case-insensitive substring matched against cell text.
    Text(String),
    /// Arbitrary criteria understood by a custom [`FilterMethod`].
    Custom(serde_json::Value),
}

impl FilterTerm {
    /// An empty term disables filtering.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterTerm::Text(text) => text.is_empty(),
            FilterTerm::Custom(value) => value.is_null(),
        }
    }
}

impl Default for FilterTerm {
    fn default() -> Self {
        FilterTerm::Text(String::new())
    }
}

impl From<&str> for FilterTerm {
    fn from(v: &str) -> Self {
        FilterTerm::Text(v.to_string())
    }
}

impl From<String> for FilterTerm {
    fn from(v: String) -> Self {
        FilterTerm::Text(v)
    }
}

impl From<serde_json::Value> for FilterTerm {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(text) => FilterTerm::Text(text),
            other => FilterTerm::Custom(other),
        }
    }
}

/// Replacement for the default filter algorithm.
///
/// Receives the candidate rows paired with their position in the table, the
/// term and the filterable columns. Its result is used verbatim; each row
/// must keep its position. Pairs whose position is outside the table are
/// dropped.
pub type FilterMethod<R> = Arc<
    dyn for<'a> Fn(Vec<(usize, &'a R)>, &FilterTerm, &[&Column<R>]) -> Vec<(usize, &'a R)>
        + Send
        + Sync,
>;

/// Default filter.
///
/// An empty term keeps every row. Otherwise a row matches when the lower-cased
/// cell text of any of `columns` contains the lower-cased term. Matching rows
/// keep their relative order.
///
/// [`FilterTerm::Custom`] terms need a custom [`FilterMethod`]; here they
/// match everything.
pub fn filter<T: RowRef<R>, R>(rows: Vec<T>, term: &FilterTerm, columns: &[&Column<R>]) -> Vec<T> {
    let needle = match term {
        FilterTerm::Text(text) if text.is_empty() => return rows,
        FilterTerm::Text(text) => text.to_lowercase(),
        FilterTerm::Custom(_) => {
            log::warn!("custom filter term without a filter method; keeping all rows");
            return rows;
        }
    };

    rows.into_iter()
        .filter(|row| {
            columns
                .iter()
                .any(|column| column.cell_value(row.row()).to_lowercase().contains(&needle))
        })
        .collect()
}

/// Fuzzy filter using nucleo-matcher.
///
/// A row matches when any column's cell text fuzzy-matches the term. Rows are
/// returned best match first; equal scores keep their input order.
///
/// Works on plain row references as well as the `(position, row)` pairs a
/// [`FilterMethod`] receives:
///
/// ```
/// use std::collections::HashMap;
/// use rowset::{fuzzy_filter, Column, FilterTerm, Value};
///
/// type Row = HashMap<String, Value>;
///
/// let rows: Vec<Row> = ["apple", "banana", "apricot"]
///     .iter()
///     .map(|name| HashMap::from([("name".to_string(), Value::from(*name))]))
///     .collect();
/// let name = Column::<Row>::by_name("name");
///
/// let matches = fuzzy_filter(rows.iter().collect(), &FilterTerm::from("apct"), &[&name]);
/// assert_eq!(matches.len(), 1);
/// ```
pub fn fuzzy_filter<T: RowRef<R>, R>(
    rows: Vec<T>,
    term: &FilterTerm,
    columns: &[&Column<R>],
) -> Vec<T> {
    let query = match term {
        FilterTerm::Text(text) if text.is_empty() => return rows,
        FilterTerm::Text(text) => text,
        FilterTerm::Custom(_) => {
            log::warn!("fuzzy filter cannot match a custom term; keeping all rows");
            return rows;
        }
    };

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut buf = Vec::new();
    let mut scored: Vec<(u32, T)> = rows
        .into_iter()
        .filter_map(|row| {
            columns
                .iter()
                .filter_map(|column| {
                    let text = column.cell_value(row.row());
                    pattern.score(Utf32Str::new(&text, &mut buf), &mut matcher)
                })
                .max()
                .map(|score| (score, row))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, row)| row).collect()
}
