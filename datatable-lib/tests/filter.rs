//! Tests for search and column filter predicates.

use datatable_lib::column::{Column, ColumnSet, FilterType};
use datatable_lib::model::Row;
use datatable_lib::query::{FilterState, filter_indices, matches_filter, matches_search};

fn columns() -> ColumnSet {
    ColumnSet::new(vec![
        Column::new("id", "ID"),
        Column::new("message", "Message").filterable(FilterType::Text),
        Column::new("status", "Status").filterable(FilterType::Select),
        Column::new("created", "Created")
            .data_index("created_at")
            .filterable(FilterType::Date),
    ])
    .unwrap()
}

fn records() -> Vec<Row> {
    vec![
        Row::new()
            .set("id", 1)
            .set("message", "Connection reset by peer")
            .set("status", "open")
            .set("created_at", "2024-03-01T08:15:00Z"),
        Row::new()
            .set("id", 2)
            .set("message", "Timeout talking to WORKER-7")
            .set("status", "resolved")
            .set("created_at", "2024-03-02T23:59:59Z"),
        Row::new()
            .set("id", 3)
            .set("message", "Worker crashed")
            .set("status", "open")
            .set("created_at", "2024-03-02"),
        Row::new().set("id", 4).set("status", "open-ish"),
    ]
}

#[test]
fn test_search_is_case_insensitive_over_all_fields() {
    let rows = records();
    assert!(matches_search(&rows[1], "worker"));
    assert!(matches_search(&rows[2], "WORKER"));
    assert!(!matches_search(&rows[0], "worker"));
    // Numbers are searched through their text form.
    assert!(matches_search(&rows[3], "4"));
}

#[test]
fn test_empty_search_matches_everything() {
    let rows = records();
    assert!(rows.iter().all(|row| matches_search(row, "")));
    assert!(rows.iter().all(|row| matches_search(row, "   ")));
}

#[test]
fn test_text_filter_is_substring() {
    let columns = columns();
    let message = columns.get("message").unwrap();
    let rows = records();
    assert!(matches_filter(&rows[0], message, "reset"));
    assert!(matches_filter(&rows[0], message, "RESET"));
    assert!(!matches_filter(&rows[1], message, "reset"));
    // Missing value never matches a non-empty text filter.
    assert!(!matches_filter(&rows[3], message, "reset"));
}

#[test]
fn test_select_filter_is_exact() {
    let columns = columns();
    let status = columns.get("status").unwrap();
    let rows = records();
    assert!(matches_filter(&rows[0], status, "open"));
    assert!(!matches_filter(&rows[3], status, "open"));
    assert!(!matches_filter(&rows[0], status, "Open"));
}

#[test]
fn test_date_filter_matches_calendar_day() {
    let columns = columns();
    let created = columns.get("created").unwrap();
    let rows = records();
    assert!(matches_filter(&rows[1], created, "2024-03-02"));
    assert!(matches_filter(&rows[2], created, "2024-03-02"));
    assert!(!matches_filter(&rows[0], created, "2024-03-02"));
}

#[test]
fn test_date_filter_falls_back_to_substring() {
    let columns = columns();
    let created = columns.get("created").unwrap();
    let rows = records();
    assert!(matches_filter(&rows[0], created, "2024-03"));
    assert!(!matches_filter(&rows[0], created, "2023"));
}

#[test]
fn test_constraints_combine_with_and() {
    let rows = records();
    let filters: FilterState = [("status", "open")].into_iter().collect();
    assert_eq!(filter_indices(&rows, &columns(), "", &filters), vec![0, 2]);
    assert_eq!(filter_indices(&rows, &columns(), "worker", &filters), vec![2]);
    assert_eq!(
        filter_indices(&rows, &columns(), "peer", &FilterState::new()),
        vec![0]
    );
}

#[test]
fn test_filtering_is_idempotent() {
    let rows = records();
    let columns = columns();
    let filters: FilterState = [("status", "open")].into_iter().collect();

    let once = filter_indices(&rows, &columns, "o", &filters);
    let narrowed: Vec<Row> = once.iter().map(|&i| rows[i].clone()).collect();
    let twice = filter_indices(&narrowed, &columns, "o", &filters);
    assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
}

#[test]
fn test_unknown_filter_columns_are_ignored() {
    let rows = records();
    let filters: FilterState = [("nope", "x")].into_iter().collect();
    assert_eq!(filter_indices(&rows, &columns(), "", &filters).len(), rows.len());
}

#[test]
fn test_filter_state_drops_empty_values() {
    let mut state = FilterState::new();
    assert!(state.set("status", "open"));
    assert!(!state.set("status", "open"));
    assert!(state.set("status", "  "));
    assert!(state.is_empty());
    assert!(!state.set("status", ""));
}
