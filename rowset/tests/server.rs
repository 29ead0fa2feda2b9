mod common;

use common::{Row, builder, ids, people, person};
use rowset::{Column, FilterTerm, PaginationPatch, ServerRequest, SortState, Table, TableEvent};

fn server_table() -> Table<Row> {
    builder(people()).server_side(100).build()
}

fn requests(events: Vec<TableEvent<Row>>) -> Vec<ServerRequest<Row>> {
    events
        .into_iter()
        .filter_map(|event| match event {
            TableEvent::Request(request) => Some(request),
            _ => None,
        })
        .collect()
}

#[test]
fn test_page_change_waits_for_response() {
    let mut table = server_table();
    assert!(table.is_server_side());
    assert_eq!(table.view().pages_number, 20);

    table.set_pagination(PaginationPatch::new().page(2), false);
    let sent = requests(table.drain_events());
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id.raw(), 1);
    assert_eq!(sent[0].pagination.page, 2);
    assert_eq!(sent[0].pagination.rows_number, Some(100));

    // Nothing moves until the host answers.
    assert_eq!(table.pagination().page, 1);
    assert_eq!(ids(&table.view().rows), [1, 2, 3, 4, 5]);

    let page2: Vec<Row> = (6..=10).map(|i| person(i, "next", 30, None)).collect();
    table.apply_server_response(page2, 100);
    let view = table.view();
    assert_eq!(view.page, 2);
    assert_eq!(view.first_row_index, 5);
    assert_eq!(ids(&view.rows), [6, 7, 8, 9, 10]);
    assert!(table.pending_request().is_none());
    assert!(matches!(
        &table.drain_events()[..],
        [TableEvent::UpdatePagination(p)] if p.page == 2 && p.rows_number == Some(100)
    ));
}

#[test]
fn test_only_latest_request_is_current() {
    let mut table = server_table();
    table.set_pagination(PaginationPatch::new().page(2), false);
    table.set_pagination(PaginationPatch::new().page(3), false);
    let sent = requests(table.drain_events());

    assert!(!table.is_current_request(sent[0].id));
    assert!(table.is_current_request(sent[1].id));
    assert!(sent[0].id < sent[1].id);
    assert_eq!(table.pending_request().map(|r| r.pagination.page), Some(3));
}

#[test]
fn test_filter_requests_first_page() {
    let mut table = server_table();
    table.apply_server_response(people(), 100);
    table.set_pagination(PaginationPatch::new().page(4), false);
    table.apply_server_response(people(), 100);
    table.drain_events();

    table.set_filter("jo");
    let sent = requests(table.drain_events());
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].pagination.page, 1);
    assert_eq!(sent[0].filter, FilterTerm::from("jo"));

    // Server rows are never filtered locally.
    assert_eq!(table.view().rows.len(), 5);
}

#[test]
fn test_sort_is_requested() {
    let mut table = server_table();
    table.sort("age");
    let sent = requests(table.drain_events());
    assert_eq!(sent[0].pagination.sort_state(), SortState::ascending("age"));
    assert_eq!(table.sort_state(), SortState::default());

    // Rows arrive in the host's order and are kept as-is.
    table.apply_server_response(people(), 100);
    assert_eq!(table.sort_state(), SortState::ascending("age"));
    assert_eq!(ids(&table.view().rows), [1, 2, 3, 4, 5]);
}

#[test]
fn test_dropped_sort_column_is_requested_unsorted() {
    let mut table = builder(people())
        .sort(SortState::descending("age"))
        .server_side(100)
        .build();
    table.drain_events();

    table.set_columns(vec![Column::by_name("name").sortable()]);
    let sent = requests(table.drain_events());
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].pagination.sort_state(), SortState::default());
    assert_eq!(sent[0].pagination.page, 1);

    table.apply_server_response(people(), 100);
    assert_eq!(table.sort_state(), SortState::default());
}

#[test]
fn test_forced_request_is_resent() {
    let mut table = server_table();
    table.set_pagination(PaginationPatch::new(), false);
    assert!(table.drain_events().is_empty());

    table.set_pagination(PaginationPatch::new(), true);
    table.request_server_data();
    let sent = requests(table.drain_events());
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|r| r.pagination.page == 1));
}

#[test]
fn test_response_clamps_page_to_new_total() {
    let mut table = server_table();
    table.set_pagination(PaginationPatch::new().page(10), false);
    table.apply_server_response(Vec::<Row>::new(), 12);

    assert_eq!(table.pagination().page, 3);
    assert_eq!(table.pagination().rows_number, Some(12));
}

#[test]
fn test_request_serializes_without_callbacks() {
    let mut table = server_table();
    table.set_filter("jo");
    let request = table.pending_request().cloned().unwrap();

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["filter"], "jo");
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["rows_number"], 100);
    assert!(json.get("cell_value").is_none());
}

#[test]
fn test_request_carries_cell_text() {
    let mut table = server_table();
    table.request_server_data();
    let request = table.pending_request().cloned().unwrap();

    let john = person(1, "John", 32, Some("London"));
    let cell = (request.cell_value)(&table.columns()[2], &john);
    assert_eq!(cell, "London");
}
