//! Composed table tests: phase sequencing, the empty placeholder, and the
//! interactions wired through `DataTable`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tablekit::prelude::*;

#[derive(Debug, Clone)]
struct Merchant {
    id: String,
    name: String,
    volume: i64,
}

impl Merchant {
    fn new(id: &str, name: &str, volume: i64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            volume,
        }
    }
}

impl TableRow for Merchant {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, column_id: &str) -> CellValue {
        match column_id {
            "name" => CellValue::from(self.name.as_str()),
            "volume" => CellValue::from(self.volume),
            _ => CellValue::Empty,
        }
    }
}

fn columns() -> Vec<ColumnDescriptor<Merchant>> {
    vec![
        ColumnDescriptor::new("name", "Merchant").sortable().searchable().exportable(),
        ColumnDescriptor::new("volume", "Volume").sortable().exportable(),
        ColumnDescriptor::new("notes", "Notes"),
    ]
}

fn merchants() -> Vec<Merchant> {
    vec![
        Merchant::new("m1", "Acme Supplies", 300),
        Merchant::new("m2", "Blue Harbor Coffee", 100),
        Merchant::new("m3", "Cobalt Books", 200),
    ]
}

fn full_config() -> TableConfig {
    TableConfig::new()
        .with_sorting()
        .with_filtering()
        .with_row_selection()
        .with_pagination()
        .page_size(2)
}

// =============================================================================
// Phases
// =============================================================================

#[test]
fn loading_phase_renders_inert_controls() {
    let table = DataTable::new(columns(), full_config());
    let rows = merchants();

    let view = table
        .render(&rows, &LoadPhase::Loading)
        .rendered()
        .unwrap();

    assert!(matches!(view.body, BodyView::Loading { .. }));
    assert!(view.search.is_some_and(|s| !s.enabled));
    assert!(view.pagination.is_none());
    assert!(view.selection.is_none());
}

#[test]
fn error_phase_lands_on_the_fallback_path() {
    let table = DataTable::new(columns(), full_config());
    let rows = merchants();

    let result = table.render(&rows, &LoadPhase::error("upstream timed out"));

    assert!(result.fallback().is_some());
    assert!(table.boundary().is_faulted());

    // A ready render stays faulted until retry.
    assert!(table.render(&rows, &LoadPhase::Ready).rendered().is_none());
    table.retry();
    assert!(table.render(&rows, &LoadPhase::Ready).rendered().is_some());
}

#[test]
fn empty_phase_renders_one_placeholder_spanning_visible_columns() {
    let config = full_config().empty_state("No merchants", Some("Onboard one to get started"));
    let table = DataTable::new(columns(), config);

    let view = table.render(&[], &LoadPhase::Empty).rendered().unwrap();

    match view.body {
        BodyView::Empty {
            message,
            description,
            span,
        } => {
            assert_eq!(message, "No merchants");
            assert_eq!(description.as_deref(), Some("Onboard one to get started"));
            assert_eq!(span, 3);
        }
        other => panic!("expected empty body, got {other:?}"),
    }
    assert_eq!(view.header.len(), 3);
}

#[test]
fn filtered_out_everything_also_renders_the_placeholder() {
    let table = DataTable::new(columns(), full_config());
    let rows = merchants();
    table.store().set_global_filter("zzz");

    let view = table.render(&rows, &LoadPhase::Ready).rendered().unwrap();

    assert!(matches!(view.body, BodyView::Empty { .. }));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn header_carries_sort_indicators_with_ordinals() {
    let table = DataTable::new(columns(), full_config());
    let rows = merchants();
    table.store().toggle_sort("volume");
    table.store().toggle_sort("name");

    let view = table.render(&rows, &LoadPhase::Ready).rendered().unwrap();

    let name = view.header.iter().find(|h| h.column_id == "name").unwrap();
    let volume = view.header.iter().find(|h| h.column_id == "volume").unwrap();
    let notes = view.header.iter().find(|h| h.column_id == "notes").unwrap();

    assert_eq!(name.sort.as_ref().map(|s| s.ordinal), Some(0));
    assert_eq!(volume.sort.as_ref().map(|s| s.ordinal), Some(1));
    assert!(name.sortable);
    assert!(!notes.sortable);
    assert!(notes.sort.is_none());
}

#[test]
fn pagination_region_reflects_the_filtered_total() {
    let table = DataTable::new(columns(), full_config());
    let rows = merchants();
    table.store().set_page_index(1);

    let view = table.render(&rows, &LoadPhase::Ready).rendered().unwrap();

    let pagination = view.pagination.unwrap();
    assert_eq!(pagination.info.total, 3);
    assert_eq!(pagination.info.page_count, 2);
    assert_eq!(pagination.info.display_range(), "3 to 3 of 3");
    assert_eq!(view.body.rows().len(), 1);
}

#[test]
fn pagination_control_navigates_the_store() {
    let table = DataTable::new(columns(), full_config());
    let rows = merchants();

    let control = table.pagination_control(&rows).unwrap();
    assert_eq!(control.info().page_count, 2);
    control.next_page();
    assert_eq!(table.store().pagination().page_index, 1);

    // On the last page forward navigation stays gated off.
    let control = table.pagination_control(&rows).unwrap();
    control.next_page();
    assert_eq!(table.store().pagination().page_index, 1);

    // A size change lands in the store without touching the index.
    control.set_page_size(50);
    assert_eq!(table.store().pagination(), PageState::new(1, 50));

    control.first_page();
    assert_eq!(table.store().pagination().page_index, 0);
}

#[test]
fn pagination_control_is_absent_when_pagination_is_disabled() {
    let table = DataTable::new(columns(), TableConfig::new());

    assert!(table.pagination_control(&merchants()).is_none());
}

#[test]
fn capabilities_left_disabled_do_not_leak_into_the_view() {
    let table = DataTable::new(columns(), TableConfig::new());
    let rows = merchants();
    table.store().toggle_sort("name");

    let view = table.render(&rows, &LoadPhase::Ready).rendered().unwrap();

    assert!(view.search.is_none());
    assert!(view.pagination.is_none());
    assert!(view.header.iter().all(|h| h.sort.is_none() && !h.sortable));
    assert_eq!(view.body.rows().len(), 3);
}

// =============================================================================
// Selection and actions
// =============================================================================

#[test]
fn selection_survives_filtering_but_not_data_replacement() {
    let table = DataTable::new(columns(), full_config());
    let rows = merchants();
    table.toggle_row("m2");

    // Filtering m2 out of view does not drop it from the selection.
    table.store().set_global_filter("acme");
    table.render(&rows, &LoadPhase::Ready);
    assert!(table.store().is_selected("m2"));

    // Replacing the data with a collection not containing m2 does.
    table.store().set_global_filter("");
    let replaced = vec![Merchant::new("m1", "Acme Supplies", 300)];
    table.render(&replaced, &LoadPhase::Ready);
    assert!(!table.store().is_selected("m2"));
}

#[test]
fn select_all_visible_targets_the_current_page_only() {
    let table = DataTable::new(columns(), full_config());
    let rows = merchants();

    table.select_all_visible(&rows);

    assert_eq!(
        table.store().selected_ids(),
        vec!["m1".to_string(), "m2".to_string()]
    );
}

#[test]
fn bulk_action_flow_through_the_composed_table() {
    let deleted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&deleted);
    let table = DataTable::new(columns(), full_config()).with_actions(vec![
        TableAction::new("Delete", move |rows: &[Merchant]| {
            if let Ok(mut guard) = sink.lock() {
                guard.extend(rows.iter().map(|r| r.id.clone()));
            }
        })
        .variant(ActionVariant::Destructive)
        .requires_selection()
        .confirm("Delete the selected merchants?"),
        TableAction::new("Export", |_rows: &[Merchant]| {}),
    ]);
    let rows = merchants();

    // With nothing selected only Export shows, inline.
    let view = table.render(&rows, &LoadPhase::Ready).rendered().unwrap();
    let bar = view.actions.unwrap();
    assert_eq!(bar.presentation, ActionPresentation::Inline);
    assert_eq!(bar.actions.len(), 1);
    assert_eq!(bar.actions[0].label, "Export");

    // Selecting a row makes Delete eligible, behind its confirmation.
    table.toggle_row("m3");
    let view = table.render(&rows, &LoadPhase::Ready).rendered().unwrap();
    let bar = view.actions.unwrap();
    assert_eq!(bar.actions.len(), 2);
    assert!(bar.actions[0].needs_confirmation);
    assert_eq!(view.selection.map(|s| s.count), Some(1));

    assert_eq!(
        table.invoke_action(&rows, 0),
        InvokeOutcome::AwaitingConfirmation
    );
    assert!(deleted.lock().map(|g| g.is_empty()).unwrap_or(false));

    assert!(table.confirm_action(&rows));
    assert_eq!(
        deleted.lock().map(|g| g.clone()).unwrap_or_default(),
        vec!["m3".to_string()]
    );
}

#[test]
fn clear_selection_resets_the_whole_store() {
    let table = DataTable::new(columns(), full_config());
    table.toggle_row("m1");
    table.store().toggle_sort("name");
    table.store().set_global_filter("acme");
    table.store().set_page_index(1);

    table.clear_selection();

    let snapshot = table.store().snapshot();
    assert!(snapshot.selected.is_empty());
    assert!(snapshot.sorting.is_empty());
    assert!(snapshot.search.is_empty());
    assert_eq!(snapshot.pagination.page_index, 0);
    assert_eq!(table.search().value(), "");
}

// =============================================================================
// Activation and export
// =============================================================================

#[test]
fn activating_an_unknown_row_is_an_error() {
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    let table = DataTable::new(columns(), full_config())
        .on_row_click(move |m: &Merchant| {
            if let Ok(mut guard) = sink.lock() {
                guard.push(m.id.clone());
            }
        });
    let rows = merchants();

    assert!(table.activate_row(&rows, "m2").is_ok());
    assert_eq!(
        table.activate_row(&rows, "m9"),
        Err(TableError::UnknownRow {
            id: "m9".to_string()
        })
    );
    assert_eq!(
        clicked.lock().map(|g| g.clone()).unwrap_or_default(),
        vec!["m2".to_string()]
    );
}

#[test]
fn export_covers_all_filtered_rows_regardless_of_page() {
    let exported = Arc::new(Mutex::new((0usize, Vec::new())));
    let sink = Arc::clone(&exported);
    let table = DataTable::new(columns(), full_config().with_export())
        .on_export(move |rows: &[Merchant], cols: &[String]| {
            if let Ok(mut guard) = sink.lock() {
                *guard = (rows.len(), cols.to_vec());
            }
        });
    let rows = merchants();
    table.store().set_page_index(1);

    assert!(table.export(&rows));

    let (count, cols) = exported.lock().map(|g| g.clone()).unwrap_or_default();
    // All three rows, not just the one on the current page; only columns
    // marked exportable.
    assert_eq!(count, 3);
    assert_eq!(cols, vec!["name".to_string(), "volume".to_string()]);
}

#[test]
fn export_disabled_is_a_silent_no_op() {
    let table = DataTable::new(columns(), full_config())
        .on_export(|_rows: &[Merchant], _cols: &[String]| panic!("must not run"));

    assert!(!table.export(&merchants()));
}

// =============================================================================
// Search wiring
// =============================================================================

#[tokio::test(start_paused = true)]
async fn committed_search_resets_to_the_first_page() {
    let table = DataTable::new(
        columns(),
        full_config().search_debounce(Duration::from_millis(100)),
    );
    table.store().set_page_index(1);

    table.search().input("cobalt");
    tokio::time::sleep(Duration::from_millis(101)).await;

    assert_eq!(table.store().global_filter(), "cobalt");
    assert_eq!(table.store().pagination().page_index, 0);
}
