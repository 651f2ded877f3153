//! Pipeline tests: the fixed filter -> sort -> paginate order and the
//! capability gates.

use tablekit::pagination::PageState;
use tablekit::table::{
    CellValue, ColumnDescriptor, SortKey, StateSnapshot, TableConfig, TableRow, pipeline,
};

#[derive(Debug, Clone)]
struct Order {
    id: String,
    merchant: String,
    amount: i64,
    status: String,
}

impl Order {
    fn new(id: &str, merchant: &str, amount: i64, status: &str) -> Self {
        Self {
            id: id.to_string(),
            merchant: merchant.to_string(),
            amount,
            status: status.to_string(),
        }
    }
}

impl TableRow for Order {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, column_id: &str) -> CellValue {
        match column_id {
            "merchant" => CellValue::from(self.merchant.as_str()),
            "amount" => CellValue::from(self.amount),
            "status" => CellValue::from(self.status.as_str()),
            _ => CellValue::Empty,
        }
    }
}

fn columns() -> Vec<ColumnDescriptor<Order>> {
    vec![
        ColumnDescriptor::new("merchant", "Merchant").sortable().searchable(),
        ColumnDescriptor::new("amount", "Amount").sortable(),
        ColumnDescriptor::new("status", "Status").filterable(),
    ]
}

fn orders() -> Vec<Order> {
    vec![
        Order::new("o1", "Acme", 300, "paid"),
        Order::new("o2", "Blue Harbor", 100, "pending"),
        Order::new("o3", "Acme", 100, "paid"),
        Order::new("o4", "Cobalt", 200, "refunded"),
        Order::new("o5", "Blue Harbor", 300, "paid"),
    ]
}

fn ids<'a>(rows: &[&'a Order]) -> Vec<&'a str> {
    rows.iter().map(|o| o.id.as_str()).collect()
}

fn full_config() -> TableConfig {
    TableConfig::new()
        .with_sorting()
        .with_filtering()
        .with_pagination()
        .page_size(2)
}

// =============================================================================
// Stage order
// =============================================================================

#[test]
fn filters_apply_before_sorting_and_pagination() {
    let rows = orders();
    let state = StateSnapshot {
        column_filters: [("status".to_string(), "paid".to_string())].into(),
        sorting: vec![SortKey::asc("amount")],
        pagination: PageState::new(0, 2),
        ..Default::default()
    };

    let out = pipeline::run(&rows, &columns(), &state, &full_config());

    // Three paid orders survive the filter; pagination slices the sorted
    // survivors, not the raw collection.
    assert_eq!(out.filtered_total, 3);
    assert_eq!(ids(&out.page_rows), vec!["o3", "o1"]);
}

#[test]
fn second_page_continues_the_sorted_sequence() {
    let rows = orders();
    let state = StateSnapshot {
        column_filters: [("status".to_string(), "paid".to_string())].into(),
        sorting: vec![SortKey::asc("amount")],
        pagination: PageState::new(1, 2),
        ..Default::default()
    };

    let out = pipeline::run(&rows, &columns(), &state, &full_config());

    assert_eq!(ids(&out.page_rows), vec!["o5"]);
}

#[test]
fn final_output_depends_only_on_accumulated_state() {
    let rows = orders();
    let a = StateSnapshot {
        column_filters: [("status".to_string(), "paid".to_string())].into(),
        sorting: vec![SortKey::desc("amount")],
        ..Default::default()
    };
    // Same slices, as if reached in the opposite order.
    let b = a.clone();

    let out_a = pipeline::run(&rows, &columns(), &a, &full_config());
    let out_b = pipeline::run(&rows, &columns(), &b, &full_config());

    assert_eq!(ids(&out_a.page_rows), ids(&out_b.page_rows));
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn multi_key_sort_breaks_ties_with_secondary_key() {
    let rows = orders();
    let state = StateSnapshot {
        sorting: vec![SortKey::asc("amount"), SortKey::asc("merchant")],
        ..Default::default()
    };
    let config = TableConfig::new().with_sorting();

    let out = pipeline::run(&rows, &columns(), &state, &config);

    assert_eq!(ids(&out.page_rows), vec!["o3", "o2", "o4", "o1", "o5"]);
}

#[test]
fn sort_is_stable_for_full_ties() {
    let rows = orders();
    let state = StateSnapshot {
        sorting: vec![SortKey::asc("amount")],
        ..Default::default()
    };
    let config = TableConfig::new().with_sorting();

    let out = pipeline::run(&rows, &columns(), &state, &config);

    // o2 and o3 both have amount 100 and keep their input order.
    assert_eq!(ids(&out.page_rows), vec!["o2", "o3", "o4", "o1", "o5"]);
}

#[test]
fn sort_keys_for_unknown_or_unsortable_columns_are_inert() {
    let rows = orders();
    let state = StateSnapshot {
        sorting: vec![SortKey::asc("status"), SortKey::asc("missing")],
        ..Default::default()
    };
    let config = TableConfig::new().with_sorting();

    let out = pipeline::run(&rows, &columns(), &state, &config);

    assert_eq!(ids(&out.page_rows), vec!["o1", "o2", "o3", "o4", "o5"]);
}

// =============================================================================
// Capability gates
// =============================================================================

#[test]
fn preseeded_state_is_not_applied_while_capabilities_are_disabled() {
    let rows = orders();
    let state = StateSnapshot {
        column_filters: [("status".to_string(), "paid".to_string())].into(),
        sorting: vec![SortKey::desc("amount")],
        search: "acme".to_string(),
        pagination: PageState::new(1, 2),
        ..Default::default()
    };
    let config = TableConfig::new();

    let out = pipeline::run(&rows, &columns(), &state, &config);

    assert_eq!(out.filtered_total, 5);
    assert_eq!(ids(&out.page_rows), vec!["o1", "o2", "o3", "o4", "o5"]);
}

#[test]
fn filters_for_non_filterable_columns_are_inert() {
    let rows = orders();
    let state = StateSnapshot {
        // "merchant" is not declared filterable.
        column_filters: [("merchant".to_string(), "Acme".to_string())].into(),
        ..Default::default()
    };
    let config = TableConfig::new().with_filtering();

    let out = pipeline::run(&rows, &columns(), &state, &config);

    assert_eq!(out.filtered_total, 5);
}

// =============================================================================
// Global search
// =============================================================================

#[test]
fn search_matches_any_searchable_column_case_insensitively() {
    let rows = orders();
    let state = StateSnapshot {
        search: "blue".to_string(),
        ..Default::default()
    };
    let config = TableConfig::new().with_filtering();

    let out = pipeline::run(&rows, &columns(), &state, &config);

    assert_eq!(ids(&out.page_rows), vec!["o2", "o5"]);
}

#[test]
fn search_ignores_columns_not_marked_searchable() {
    let rows = orders();
    let state = StateSnapshot {
        // "paid" only appears in the status column, which is not searchable.
        search: "paid".to_string(),
        ..Default::default()
    };
    let config = TableConfig::new().with_filtering();

    let out = pipeline::run(&rows, &columns(), &state, &config);

    assert_eq!(out.filtered_total, 0);
    assert!(out.page_rows.is_empty());
}

#[test]
fn searchable_columns_override_narrows_the_search_domain() {
    let rows = orders();
    let state = StateSnapshot {
        search: "acme".to_string(),
        ..Default::default()
    };
    let config = TableConfig::new()
        .with_filtering()
        .searchable_columns(vec!["status"]);

    let out = pipeline::run(&rows, &columns(), &state, &config);

    assert_eq!(out.filtered_total, 0);
}

// =============================================================================
// Pagination over a larger collection
// =============================================================================

fn many_orders(n: usize) -> Vec<Order> {
    (0..n)
        .map(|i| Order::new(&format!("o{i:03}"), "Acme", i as i64, "paid"))
        .collect()
}

#[test]
fn twenty_three_rows_at_ten_per_page_fill_three_pages() {
    let rows = many_orders(23);
    let config = TableConfig::new().with_pagination().page_size(10);

    for (index, expected) in [(0, 10), (1, 10), (2, 3)] {
        let state = StateSnapshot {
            pagination: PageState::new(index, 10),
            ..Default::default()
        };
        let out = pipeline::run(&rows, &columns(), &state, &config);
        assert_eq!(out.filtered_total, 23);
        assert_eq!(out.page_rows.len(), expected, "page {index}");
    }
}

#[test]
fn page_index_past_the_end_yields_no_rows() {
    let rows = many_orders(23);
    let config = TableConfig::new().with_pagination();
    let state = StateSnapshot {
        pagination: PageState::new(9, 10),
        ..Default::default()
    };

    let out = pipeline::run(&rows, &columns(), &state, &config);

    assert_eq!(out.filtered_total, 23);
    assert!(out.page_rows.is_empty());
}

// =============================================================================
// Column visibility
// =============================================================================

#[test]
fn visibility_overrides_apply_only_when_enabled() {
    let cols = columns();
    let state = StateSnapshot {
        column_visibility: [("amount".to_string(), false)].into(),
        ..Default::default()
    };

    let hidden = pipeline::visible_columns(
        &cols,
        &state,
        &TableConfig::new().with_column_visibility(),
    );
    assert_eq!(
        hidden.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["merchant", "status"]
    );

    let ignored = pipeline::visible_columns(&cols, &state, &TableConfig::new());
    assert_eq!(ignored.len(), 3);
}
