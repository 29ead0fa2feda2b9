mod common;

use common::{Row, builder, people};
use rowset::{Error, RowKey, SelectionMode, Table, TableConfig, TableEvent, Value};

fn table(mode: SelectionMode) -> Table<Row> {
    builder(people())
        .config(TableConfig::default().with_selection(mode))
        .build()
}

fn selection_events(events: &[TableEvent<Row>]) -> Vec<(Vec<RowKey>, bool)> {
    events
        .iter()
        .filter_map(|event| match event {
            TableEvent::Selection { keys, added, .. } => Some((keys.clone(), *added)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_mode_replaces_atomically() {
    let rows: Vec<Row> = ["a", "b", "c"]
        .iter()
        .map(|id| {
            let mut row = Row::new();
            row.insert("id".into(), (*id).into());
            row
        })
        .collect();
    let mut table = Table::<Row>::builder(Vec::new())
        .rows(rows)
        .row_key(rowset::RowKeyResolver::field("id"))
        .config(TableConfig::default().with_selection(SelectionMode::Single))
        .build();

    table.toggle_row("a");
    table.drain_events();

    table.toggle_row("b");
    assert_eq!(table.selected_keys(), &[RowKey::from("b")]);

    let events = table.drain_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0],
        TableEvent::Selection { keys, added: false, rows } if keys == &[RowKey::from("a")] && rows.len() == 1
    ));
    assert!(matches!(
        &events[1],
        TableEvent::Selection { keys, added: true, .. } if keys == &[RowKey::from("b")]
    ));
    assert!(matches!(
        &events[2],
        TableEvent::UpdateSelected(keys) if keys == &[RowKey::from("b")]
    ));
}

#[test]
fn test_single_mode_never_holds_two_keys() {
    let mut table = table(SelectionMode::Single);
    let sequence = [1, 2, 2, 3, 1, 1, 5, 4, 4, 2];
    for id in sequence {
        table.toggle_row(id);
        assert!(table.selected_keys().len() <= 1);
    }
    assert_eq!(table.selected_keys(), &[RowKey::Int(2)]);
}

#[test]
fn test_disabled_selection_ignores_toggles() {
    let mut table = table(SelectionMode::None);
    table.toggle_row(1);
    assert!(!table.is_row_selected(&RowKey::Int(1)));
    assert!(table.drain_events().is_empty());

    assert_eq!(table.try_toggle_row(1), Err(Error::SelectionDisabled));
    assert_eq!(
        table.try_set_selected([RowKey::Int(1)]),
        Err(Error::SelectionDisabled)
    );
}

#[test]
fn test_multiple_toggles_independently() {
    let mut table = table(SelectionMode::Multiple);
    table.toggle_row(1);
    table.toggle_row(3);
    table.toggle_row(1);
    assert_eq!(table.selected_keys(), &[RowKey::Int(3)]);

    let events = table.drain_events();
    assert_eq!(
        selection_events(&events),
        [
            (vec![RowKey::Int(1)], true),
            (vec![RowKey::Int(3)], true),
            (vec![RowKey::Int(1)], false),
        ]
    );
}

#[test]
fn test_set_selected_reports_difference() {
    let mut table = table(SelectionMode::Multiple);
    table.set_selected([RowKey::Int(1), RowKey::Int(2)]);
    table.drain_events();

    table.set_selected([RowKey::Int(2), RowKey::Int(4)]);
    let events = table.drain_events();
    assert_eq!(
        selection_events(&events),
        [(vec![RowKey::Int(1)], false), (vec![RowKey::Int(4)], true)]
    );
    assert!(matches!(
        events.last(),
        Some(TableEvent::UpdateSelected(keys)) if keys == &[RowKey::Int(2), RowKey::Int(4)]
    ));
}

#[test]
fn test_selection_survives_filtering() {
    let mut table = table(SelectionMode::Multiple);
    table.toggle_row(3);
    table.set_filter("london");

    assert!(table.view().rows.iter().all(|row| row["id"] != Value::Int(3)));
    assert!(table.is_row_selected(&RowKey::Int(3)));
    assert_eq!(table.selected_rows().len(), 1);
}

#[test]
fn test_toggle_all_on_page() {
    let mut table = builder(people())
        .config(TableConfig::default().with_selection(SelectionMode::Multiple))
        .rows_per_page(5)
        .build();

    table.toggle_all_on_page();
    assert!(table.all_rows_selected());
    assert_eq!(table.selected_keys().len(), 5);

    table.toggle_row(2);
    assert!(table.some_rows_selected());

    // Partially selected: the header deselects.
    table.toggle_all_on_page();
    assert!(table.selected_keys().is_empty());
    assert!(!table.some_rows_selected());
}

#[test]
fn test_clear_selection() {
    let mut table = table(SelectionMode::Multiple);
    table.set_selected([RowKey::Int(1), RowKey::Int(2)]);
    table.drain_events();

    table.clear_selection();
    assert!(table.selected_keys().is_empty());
    let events = table.drain_events();
    assert_eq!(selection_events(&events), [(vec![RowKey::Int(1), RowKey::Int(2)], false)]);

    table.clear_selection();
    assert!(table.drain_events().is_empty());
}

#[test]
fn test_switching_to_single_keeps_latest() {
    let mut table = table(SelectionMode::Multiple);
    table.set_selected([RowKey::Int(1), RowKey::Int(2)]);
    table.set_selection_mode(SelectionMode::Single);
    assert_eq!(table.selected_keys(), &[RowKey::Int(2)]);
}
