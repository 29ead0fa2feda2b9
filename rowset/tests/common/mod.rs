#![allow(dead_code)]

use std::collections::HashMap;

use rowset::{Column, RowKeyResolver, Table, TableBuilder, Value};

pub type Row = HashMap<String, Value>;

pub fn person(id: i64, name: &str, age: impl Into<Value>, city: Option<&str>) -> Row {
    HashMap::from([
        ("id".to_string(), Value::Int(id)),
        ("name".to_string(), Value::from(name)),
        ("age".to_string(), age.into()),
        ("city".to_string(), Value::from(city)),
    ])
}

pub fn people() -> Vec<Row> {
    vec![
        person(1, "John", 32, Some("London")),
        person(2, "Joanna", 28, Some("Paris")),
        person(3, "Mark", 45, None),
        person(4, "Alice", 28, Some("Berlin")),
        person(5, "bob", 19, Some("London")),
    ]
}

pub fn columns() -> Vec<Column<Row>> {
    vec![
        Column::by_name("name").with_label("Name").sortable(),
        Column::by_name("age").with_label("Age").sortable(),
        Column::by_name("city").with_label("City"),
    ]
}

pub fn builder(rows: Vec<Row>) -> TableBuilder<Row> {
    Table::builder(columns())
        .rows(rows)
        .row_key(RowKeyResolver::field("id"))
}

pub fn names(rows: &[&Row]) -> Vec<String> {
    rows.iter().map(|row| row["name"].to_string()).collect()
}

pub fn ids(rows: &[&Row]) -> Vec<i64> {
    rows.iter()
        .map(|row| match row["id"] {
            Value::Int(id) => id,
            _ => panic!("row without id"),
        })
        .collect()
}
