mod common;

use common::{Row, builder, names, person};
use rowset::{PageInfo, PaginationPatch, SortState, TableEvent, page_range, pages_number, paginate};

/// 25 rows whose names are a shuffled `n00..n24`.
fn shuffled() -> Vec<Row> {
    (0..25)
        .map(|i| person(i, &format!("n{:02}", (i * 7) % 25), 20, None))
        .collect()
}

#[test]
fn test_pages_cover_every_row_once() {
    let rows: Vec<usize> = (0..53).collect();
    for rows_per_page in [1, 2, 5, 10, 13, 53, 60] {
        let pages = pages_number(rows.len(), rows_per_page);
        let joined: Vec<usize> = (1..=pages)
            .flat_map(|page| paginate(&rows, page, rows_per_page).iter().copied())
            .collect();
        assert_eq!(joined, rows, "rows_per_page {}", rows_per_page);
    }
}

#[test]
fn test_out_of_range_pages_clamp() {
    let rows: Vec<usize> = (0..25).collect();
    let pages = pages_number(rows.len(), 10);
    assert_eq!(paginate(&rows, 0, 10), paginate(&rows, 1, 10));
    assert_eq!(paginate(&rows, pages + 5, 10), paginate(&rows, pages, 10));
}

#[test]
fn test_zero_rows_per_page_shows_everything() {
    let rows: Vec<usize> = (0..25).collect();
    assert_eq!(paginate(&rows, 3, 0).len(), 25);
    assert_eq!(pages_number(25, 0), 1);
}

#[test]
fn test_empty_collection_has_one_page() {
    let info = PageInfo::new(0, 4, 10);
    assert_eq!(info.page, 1);
    assert_eq!(info.pages_number, 1);
    assert!(info.is_first_page && info.is_last_page);
    assert_eq!(page_range(0, 4, 10), 0..0);
}

#[test]
fn test_sorted_pages_of_25_rows() {
    let mut table = builder(shuffled())
        .rows_per_page(10)
        .sort(SortState::ascending("name"))
        .build();

    let page1 = table.view();
    assert_eq!(page1.pages_number, 3);
    assert!(page1.is_first_page);
    assert!(!page1.is_last_page);
    let expected: Vec<String> = (0..10).map(|i| format!("n{:02}", i)).collect();
    assert_eq!(names(&page1.rows), expected);

    table.next_page();
    assert!(!table.view().is_last_page);

    table.next_page();
    let page3 = table.view();
    assert_eq!(page3.page, 3);
    assert!(page3.is_last_page);
    assert_eq!(page3.first_row_index, 20);
    assert_eq!(page3.last_row_index, 25);
    let expected: Vec<String> = (20..25).map(|i| format!("n{:02}", i)).collect();
    assert_eq!(names(&page3.rows), expected);
}

#[test]
fn test_navigation_stops_at_boundaries() {
    let mut table = builder(shuffled()).rows_per_page(10).build();

    table.prev_page();
    table.first_page();
    assert!(table.drain_events().is_empty());

    table.last_page();
    assert_eq!(table.pagination().page, 3);
    table.next_page();
    table.last_page();
    assert_eq!(table.drain_events().len(), 1);
    assert_eq!(table.pagination().page, 3);

    table.first_page();
    assert_eq!(table.pagination().page, 1);
}

#[test]
fn test_set_pagination_clamps_page() {
    let mut table = builder(shuffled()).rows_per_page(10).build();

    table.set_pagination(PaginationPatch::new().page(99), false);
    assert_eq!(table.pagination().page, 3);

    table.set_pagination(PaginationPatch::new().page(0), false);
    assert_eq!(table.pagination().page, 1);
}

#[test]
fn test_rows_per_page_change_resets_page() {
    let mut table = builder(shuffled()).rows_per_page(10).build();
    table.last_page();
    table.drain_events();

    table.set_pagination(PaginationPatch::new().rows_per_page(5), false);
    assert_eq!(table.pagination().page, 1);
    assert_eq!(table.view().pages_number, 5);

    let events = table.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        TableEvent::UpdatePagination(p) if p.rows_per_page == 5 && p.page == 1
    ));
}

#[test]
fn test_invalid_rows_per_page_is_rejected() {
    let mut table = builder(shuffled()).rows_per_page(10).build();
    let err = table
        .try_set_pagination(PaginationPatch::new().rows_per_page(11), false)
        .unwrap_err();
    assert!(matches!(err, rowset::Error::InvalidRowsPerPage { value: 11, .. }));

    table.set_pagination(PaginationPatch::new().rows_per_page(11), false);
    assert_eq!(table.pagination().rows_per_page, 10);
    assert!(table.drain_events().is_empty());
}

#[test]
fn test_page_follows_shrinking_rows() {
    let mut table = builder(shuffled()).rows_per_page(10).build();
    table.last_page();
    table.drain_events();

    table.set_rows(shuffled().into_iter().take(12).collect::<Vec<_>>());
    assert_eq!(table.pagination().page, 2);
    assert_eq!(table.view().rows.len(), 2);

    let events = table.drain_events();
    assert!(matches!(&events[..], [TableEvent::UpdatePagination(p)] if p.page == 2));
}

#[test]
fn test_unchanged_pagination_is_silent() {
    let mut table = builder(shuffled()).rows_per_page(10).build();
    table.set_pagination(PaginationPatch::new().page(1).rows_per_page(10), false);
    assert!(table.drain_events().is_empty());
}
