//! Column definitions.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::value::Record;
use crate::value::Value;

/// Reads a cell value from a row.
pub type Getter<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Compares two cell values; the rows they came from are passed along.
pub type Comparator<R> = Arc<dyn Fn(&Value, &Value, &R, &R) -> Ordering + Send + Sync>;

/// Turns a cell value into display text.
pub type Formatter<R> = Arc<dyn Fn(&Value, &R) -> String + Send + Sync>;

/// Where a column's cell value comes from.
pub enum Field<R> {
    /// A named field of a [`Record`] row.
    ByName(String),
    /// A function of the row.
    ByFunction(Getter<R>),
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        match self {
            Field::ByName(name) => Field::ByName(name.clone()),
            Field::ByFunction(f) => Field::ByFunction(f.clone()),
        }
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::ByName(name) => f.debug_tuple("ByName").field(name).finish(),
            Field::ByFunction(_) => f.write_str("ByFunction(..)"),
        }
    }
}

/// Default sort direction cycle of a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending first, then descending, then unsorted.
    #[default]
    Ad,
    /// Descending first, then ascending, then unsorted.
    Da,
}

/// Horizontal alignment hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A table column.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use rowset::{Column, Value};
///
/// type Row = HashMap<String, Value>;
///
/// let name = Column::<Row>::by_name("name").with_label("Name").sortable();
/// let shout = Column::<Row>::computed("shout", |row: &Row| {
///     Value::from(row.get("name").map(|v| v.to_string().to_uppercase()))
/// });
/// assert_eq!(name.label(), "Name");
/// assert!(!shout.is_sortable());
/// ```
pub struct Column<R> {
    name: String,
    label: String,
    field: Field<R>,
    getter: Getter<R>,
    sortable: bool,
    sort: Option<Comparator<R>>,
    raw_sort: Option<Comparator<R>>,
    sort_order: Option<SortOrder>,
    format: Option<Formatter<R>>,
    align: Align,
    required: bool,
    filterable: bool,
}

impl<R: Record + 'static> Column<R> {
    /// Column reading the field with the same name as the column.
    pub fn by_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), Field::ByName(name))
    }

    /// Column reading `field`.
    pub fn new(name: impl Into<String>, field: Field<R>) -> Self {
        let getter: Getter<R> = match &field {
            Field::ByName(field_name) => {
                let field_name = field_name.clone();
                Arc::new(move |row: &R| row.field(&field_name))
            }
            Field::ByFunction(f) => f.clone(),
        };
        Self::with_getter(name.into(), field, getter)
    }
}

impl<R> Column<R> {
    /// Column computing its value from the row. Works for any row type.
    pub fn computed<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        let getter: Getter<R> = Arc::new(f);
        Self::with_getter(name.into(), Field::ByFunction(getter.clone()), getter)
    }

    fn with_getter(name: String, field: Field<R>, getter: Getter<R>) -> Self {
        Self {
            label: name.clone(),
            name,
            field,
            getter,
            sortable: false,
            sort: None,
            raw_sort: None,
            sort_order: None,
            format: None,
            align: Align::default(),
            required: false,
            filterable: true,
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Allow sorting by this column.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Custom comparator. Only called when both values are non-null.
    pub fn with_sort<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value, &R, &R) -> Ordering + Send + Sync + 'static,
    {
        self.sort = Some(Arc::new(f));
        self
    }

    /// Comparator that sees every value, nulls included. Takes precedence
    /// over [`with_sort`](Self::with_sort) and the null ordering.
    pub fn with_raw_sort<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value, &R, &R) -> Ordering + Send + Sync + 'static,
    {
        self.raw_sort = Some(Arc::new(f));
        self
    }

    /// Header click cycle. Overrides the table default.
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Display formatter. Its output is what filtering matches against.
    pub fn with_format<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &R) -> String + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(f));
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Keep the column visible regardless of the visible-column set.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Exclude the column from text filtering.
    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn field(&self) -> &Field<R> {
        &self.field
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn sort_fn(&self) -> Option<&Comparator<R>> {
        self.sort.as_ref()
    }

    pub fn raw_sort_fn(&self) -> Option<&Comparator<R>> {
        self.raw_sort.as_ref()
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort_order
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Raw cell value of `row`.
    pub fn value_of(&self, row: &R) -> Value {
        (self.getter)(row)
    }

    /// Display text of `row`'s cell: the formatter's output, or the value's
    /// string form (empty for null).
    pub fn cell_value(&self, row: &R) -> String {
        let value = self.value_of(row);
        match &self.format {
            Some(format) => format(&value, row),
            None => value.to_string(),
        }
    }
}

/// Display text of `row` in `column`. Handed to server requests so the
/// host can reproduce client-side filtering.
pub fn cell_value<R>(column: &Column<R>, row: &R) -> String {
    column.cell_value(row)
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            label: self.label.clone(),
            field: self.field.clone(),
            getter: self.getter.clone(),
            sortable: self.sortable,
            sort: self.sort.clone(),
            raw_sort: self.raw_sort.clone(),
            sort_order: self.sort_order,
            format: self.format.clone(),
            align: self.align,
            required: self.required,
            filterable: self.filterable,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("field", &self.field)
            .field("sortable", &self.sortable)
            .field("sort_order", &self.sort_order)
            .field("align", &self.align)
            .field("required", &self.required)
            .field("filterable", &self.filterable)
            .finish_non_exhaustive()
    }
}
