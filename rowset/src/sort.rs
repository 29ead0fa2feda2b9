//! Sort stage and header toggle policy.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::column::SortOrder;
use crate::value::RowRef;
use crate::value::Value;

/// Active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortState {
    /// Column name, `None` for input order.
    pub sort_by: Option<String>,
    pub descending: bool,
}

impl SortState {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            sort_by: Some(column.into()),
            descending: false,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            sort_by: Some(column.into()),
            descending: true,
        }
    }
}

/// Replacement for the default sort stage.
///
/// Called with the rows paired with their position in the table, the active
/// column name, the direction and every column of the table. Only invoked
/// when a column is active. Each row must keep its position.
pub type SortMethod<R> = Arc<
    dyn for<'a> Fn(Vec<(usize, &'a R)>, &str, bool, &[Column<R>]) -> Vec<(usize, &'a R)>
        + Send
        + Sync,
>;

/// Default sort stage.
///
/// Without `sort_by`, or when the column is unknown or not sortable, rows
/// come back in input order. The sort is stable in both directions: rows
/// comparing equal keep their input order.
pub fn sort<T: RowRef<R>, R>(
    rows: Vec<T>,
    sort_by: Option<&str>,
    descending: bool,
    columns: &[Column<R>],
) -> Vec<T> {
    let Some(name) = sort_by else {
        return rows;
    };
    let Some(column) = columns.iter().find(|c| c.name() == name) else {
        log::warn!("cannot sort by unknown column `{}`", name);
        return rows;
    };
    if !column.is_sortable() {
        log::warn!("column `{}` is not sortable", name);
        return rows;
    }

    let mut keyed: Vec<(Value, T)> = rows
        .into_iter()
        .map(|row| (column.value_of(row.row()), row))
        .collect();

    keyed.sort_by(|(a, row_a), (b, row_b)| {
        let ord = compare_cells(column, a, b, row_a.row(), row_b.row());
        if descending { ord.reverse() } else { ord }
    });

    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Ascending order of two cells of `column`.
///
/// `raw_sort` sees every value. Otherwise nulls come first, then the custom
/// `sort`, then [`default_compare`].
fn compare_cells<R>(column: &Column<R>, a: &Value, b: &Value, row_a: &R, row_b: &R) -> Ordering {
    if let Some(raw_sort) = column.raw_sort_fn() {
        return raw_sort(a, b, row_a, row_b);
    }
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    if let Some(sort) = column.sort_fn() {
        return sort(a, b, row_a, row_b);
    }
    default_compare(a, b)
}

/// Default ascending comparison of two non-null values.
///
/// Numbers compare numerically (ints and floats mixed), timestamps
/// chronologically, bools with `false < true` and strings by lower-cased
/// text. Values of different kinds order by kind: bools, numbers,
/// timestamps, then strings.
pub fn default_compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => kind_rank(a).cmp(&kind_rank(b)),
        },
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::DateTime(_) => 3,
        Value::String(_) => 4,
    }
}

/// Sort state after a click on `column`'s header.
///
/// A different column becomes active, descending when its order is
/// [`SortOrder::Da`]. Clicking the active column again cycles through the
/// order's directions and back to unsorted; with `binary_state_sort` it only
/// flips the direction.
pub fn next_sort_state(
    current: &SortState,
    column: &str,
    order: SortOrder,
    binary_state_sort: bool,
) -> SortState {
    if current.sort_by.as_deref() != Some(column) {
        return SortState {
            sort_by: Some(column.to_string()),
            descending: order == SortOrder::Da,
        };
    }

    if binary_state_sort {
        return SortState {
            sort_by: current.sort_by.clone(),
            descending: !current.descending,
        };
    }

    match (order, current.descending) {
        (SortOrder::Ad, false) => SortState::descending(column),
        (SortOrder::Da, true) => SortState::ascending(column),
        _ => SortState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compare_mixed_numbers() {
        assert_eq!(default_compare(&Value::Int(2), &Value::Float(1.5)), Ordering::Greater);
        assert_eq!(default_compare(&Value::Float(-1.0), &Value::Int(0)), Ordering::Less);
    }

    #[test]
    fn test_default_compare_strings_ignore_case() {
        assert_eq!(
            default_compare(&Value::from("apple"), &Value::from("Banana")),
            Ordering::Less
        );
        assert_eq!(
            default_compare(&Value::from("ABC"), &Value::from("abc")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_default_compare_bools() {
        assert_eq!(
            default_compare(&Value::Bool(false), &Value::Bool(true)),
            Ordering::Less
        );
    }

    #[test]
    fn test_default_compare_orders_kinds() {
        let two = Value::Int(2);
        let ten = Value::Int(10);
        let text = Value::from("1a");
        assert_eq!(default_compare(&two, &ten), Ordering::Less);
        assert_eq!(default_compare(&ten, &text), Ordering::Less);
        assert_eq!(default_compare(&two, &text), Ordering::Less);
        assert_eq!(default_compare(&Value::Bool(true), &Value::Int(0)), Ordering::Less);
    }

    #[test]
    fn test_mixed_kinds_sort_consistently() {
        let mut values = vec![
            Value::from("b"),
            Value::Int(10),
            Value::from("1a"),
            Value::Float(2.5),
            Value::Bool(true),
            Value::Int(2),
        ];
        values.sort_by(default_compare);
        assert_eq!(
            values,
            [
                Value::Bool(true),
                Value::Int(2),
                Value::Float(2.5),
                Value::Int(10),
                Value::from("1a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_toggle_cycle_ad() {
        let s0 = SortState::default();
        let s1 = next_sort_state(&s0, "name", SortOrder::Ad, false);
        assert_eq!(s1, SortState::ascending("name"));
        let s2 = next_sort_state(&s1, "name", SortOrder::Ad, false);
        assert_eq!(s2, SortState::descending("name"));
        let s3 = next_sort_state(&s2, "name", SortOrder::Ad, false);
        assert_eq!(s3, SortState::default());
    }

    #[test]
    fn test_toggle_cycle_da() {
        let s1 = next_sort_state(&SortState::default(), "age", SortOrder::Da, false);
        assert_eq!(s1, SortState::descending("age"));
        let s2 = next_sort_state(&s1, "age", SortOrder::Da, false);
        assert_eq!(s2, SortState::ascending("age"));
        let s3 = next_sort_state(&s2, "age", SortOrder::Da, false);
        assert_eq!(s3, SortState::default());
    }

    #[test]
    fn test_toggle_binary() {
        let s1 = SortState::ascending("name");
        let s2 = next_sort_state(&s1, "name", SortOrder::Ad, true);
        assert_eq!(s2, SortState::descending("name"));
        let s3 = next_sort_state(&s2, "name", SortOrder::Ad, true);
        assert_eq!(s3, SortState::ascending("name"));
    }

    #[test]
    fn test_toggle_other_column() {
        let s1 = SortState::descending("name");
        let s2 = next_sort_state(&s1, "age", SortOrder::Ad, false);
        assert_eq!(s2, SortState::ascending("age"));
    }
}
