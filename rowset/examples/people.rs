use std::fs::File;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use rowset::{
    Align, Column, PaginationPatch, Record, RowKeyResolver, SelectionMode, Table, TableConfig,
    TableEvent, Value, VirtualScrollConfig,
};
use simplelog::{Config, LevelFilter, WriteLogger};

// ============================================================================
// Data
// ============================================================================

#[derive(Debug, Clone)]
struct Person {
    id: i64,
    name: String,
    age: i64,
    city: Option<String>,
    joined: chrono::DateTime<Utc>,
}

impl Record for Person {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "age" => self.age.into(),
            "city" => self.city.clone().into(),
            "joined" => self.joined.into(),
            _ => Value::Null,
        }
    }
}

fn people() -> Vec<Person> {
    let names = [
        "John", "Joanna", "Mark", "Alice", "bob", "Carla", "Dmitri", "Eve", "Farid", "Greta",
        "Hugo", "Ines", "Jonas", "Kim",
    ];
    let cities = [Some("London"), Some("Paris"), None, Some("Berlin")];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Person {
            id: i as i64 + 1,
            name: name.to_string(),
            age: 19 + (i as i64 * 7) % 40,
            city: cities[i % cities.len()].map(String::from),
            joined: Utc
                .with_ymd_and_hms(2020 + (i as i32 % 5), 1 + (i as u32 % 12), 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        })
        .collect()
}

fn columns() -> Vec<Column<Person>> {
    vec![
        Column::by_name("name").with_label("Name").sortable().required(),
        Column::by_name("age")
            .with_label("Age")
            .sortable()
            .with_align(Align::Right),
        Column::by_name("city")
            .with_label("City")
            .with_format(|value, _| match value {
                Value::Null => "-".to_string(),
                other => other.to_string(),
            }),
        Column::by_name("joined")
            .with_label("Joined")
            .sortable()
            .with_format(|value, _| match value {
                Value::DateTime(at) => at.format("%Y-%m").to_string(),
                other => other.to_string(),
            })
            .not_filterable(),
    ]
}

// ============================================================================
// Output
// ============================================================================

fn print_page(title: &str, table: &Table<Person>) {
    let view = table.view();
    println!(
        "\n{} (page {}/{}, rows {}..{} of {})",
        title,
        view.page,
        view.pages_number,
        view.first_row_index + 1,
        view.last_row_index,
        view.rows_number
    );
    for row in &view.rows {
        let cells: Vec<String> = table
            .visible_columns()
            .iter()
            .map(|column| format!("{:<8}", column.cell_value(row)))
            .collect();
        let mark = match table.row_key(row) {
            Some(key) if table.is_row_selected(&key) => "*",
            _ => " ",
        };
        println!("  {} {}", mark, cells.join(" "));
    }
}

fn print_events(table: &mut Table<Person>) {
    for event in table.drain_events() {
        match event {
            TableEvent::Request(request) => println!("  -> request {}", request.id),
            TableEvent::Selection { keys, added, .. } => {
                println!("  -> {} {:?}", if added { "selected" } else { "deselected" }, keys)
            }
            TableEvent::UpdatePagination(p) => println!(
                "  -> pagination page {} x {} sort {:?}",
                p.page, p.rows_per_page, p.sort_by
            ),
            other => println!("  -> {:?}", other),
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Ok(log_file) = File::create("people.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let mut table = Table::builder(columns())
        .rows(people())
        .row_key(RowKeyResolver::field("id"))
        .config(TableConfig::default().with_selection(SelectionMode::Multiple))
        .build();
    print_page("All people", &table);

    table.set_filter("jo");
    print_events(&mut table);
    print_page("Filtered by \"jo\"", &table);

    table.set_filter("");
    table.sort("age");
    table.sort("age");
    print_events(&mut table);
    print_page("Oldest first", &table);

    table.set_pagination(PaginationPatch::new().rows_per_page(10).page(2), false);
    table.toggle_row(3);
    table.toggle_all_on_page();
    print_events(&mut table);
    print_page("Page two, selected", &table);

    // Server mode: the host answers each request with a page.
    let all = people();
    let mut remote = Table::builder(columns())
        .row_key(RowKeyResolver::field("id"))
        .server_side(all.len())
        .build();
    remote.set_pagination(PaginationPatch::new().page(2), false);
    if let Some(request) = remote.pending_request().cloned() {
        let range = rowset::page_range(
            all.len(),
            request.pagination.page,
            request.pagination.rows_per_page,
        );
        println!("\nServing {:?} for request {}", range, request.id);
        remote.apply_server_response(all[range].to_vec(), all.len());
    }
    print_events(&mut remote);
    print_page("Server page", &remote);

    // Virtual scrolling over a long list.
    let many: Vec<Person> = (0..500)
        .flat_map(|_| people())
        .enumerate()
        .map(|(i, mut person)| {
            person.id = i as i64;
            person
        })
        .collect();
    let mut long = Table::builder(columns())
        .rows(many)
        .row_key(RowKeyResolver::field("id"))
        .rows_per_page(0)
        .config(
            TableConfig::default().with_virtual_scroll(
                VirtualScrollConfig::default()
                    .with_item_size(20)
                    .with_debounce(Duration::from_millis(35)),
            ),
        )
        .build();
    long.set_viewport(400);
    long.on_scroll(20_000);
    long.settle_scroll().await;
    let window = long.rows_in_window();
    if let (Some((first, _)), Some((last, _))) = (window.first(), window.last()) {
        println!("\nRendering rows {}..={} of {}", first, last, long.rows().len());
    }
    print_events(&mut long);
}
