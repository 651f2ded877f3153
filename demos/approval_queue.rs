//! Approval queue demo - a payment approval table driven entirely through
//! the headless engine.
//!
//! Seeds a batch of pending payments, then walks through the interactions a
//! host UI would wire up: paging, sorting, debounced search, row selection,
//! and a destructive bulk action behind its confirmation gate. Each step
//! prints the rendered view model to stdout.

use std::fs::File;
use std::time::Duration;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use tablekit::prelude::*;

// =============================================================================
// Data types
// =============================================================================

/// A pending payment awaiting review.
#[derive(Debug, Clone)]
struct Payment {
    id: String,
    merchant: String,
    amount_cents: i64,
    currency: String,
    flagged: bool,
}

impl TableRow for Payment {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn cell(&self, column_id: &str) -> CellValue {
        match column_id {
            "merchant" => CellValue::from(self.merchant.as_str()),
            "amount" => CellValue::from(self.amount_cents),
            "currency" => CellValue::from(self.currency.as_str()),
            "flagged" => CellValue::from(self.flagged),
            _ => CellValue::Empty,
        }
    }
}

// =============================================================================
// Mock data
// =============================================================================

const MERCHANTS: [&str; 6] = [
    "Acme Supplies",
    "Blue Harbor Coffee",
    "Cobalt Books",
    "Driftwood Audio",
    "Evergreen Market",
    "Foxglove Florists",
];

fn seed_payments() -> Vec<Payment> {
    (0..23)
        .map(|n| Payment {
            id: format!("pay_{:04}", n),
            merchant: MERCHANTS[n % MERCHANTS.len()].to_string(),
            amount_cents: ((n as i64 * 3709) % 90000) + 500,
            currency: if n % 5 == 0 { "EUR" } else { "USD" }.to_string(),
            flagged: n % 7 == 0,
        })
        .collect()
}

fn columns() -> Vec<ColumnDescriptor<Payment>> {
    vec![
        ColumnDescriptor::new("merchant", "Merchant")
            .sortable()
            .searchable()
            .filterable()
            .exportable()
            .width(20),
        ColumnDescriptor::new("amount", "Amount")
            .sortable()
            .exportable()
            .width(12)
            .with_renderer(|p: &Payment| {
                format!("{}.{:02}", p.amount_cents / 100, p.amount_cents % 100)
            }),
        ColumnDescriptor::new("currency", "Currency")
            .filterable()
            .exportable()
            .width(8),
        ColumnDescriptor::new("flagged", "Flagged").sortable().width(8),
    ]
}

// =============================================================================
// Rendering to stdout
// =============================================================================

fn print_view(title: &str, view: &Supervised<TableView>) {
    println!("== {title} ==");
    let table = match view {
        Supervised::Rendered(table) => table,
        Supervised::Fallback(fallback) => {
            println!("  !! {}", fallback.message);
            return;
        }
    };

    let header: Vec<String> = table
        .header
        .iter()
        .map(|h| match &h.sort {
            Some(ind) => format!("{} {}", h.label, ind.glyph()),
            None => h.label.clone(),
        })
        .collect();
    println!("  {}", header.join(" | "));

    match &table.body {
        BodyView::Rows(rows) => {
            for row in rows {
                let mark = if row.selected { "*" } else { " " };
                println!(" {mark}{}  {}", row.id, row.cells.join(" | "));
            }
        }
        BodyView::Empty { message, .. } => println!("  ({message})"),
        BodyView::Loading { message, .. } => println!("  ({message})"),
    }

    if let Some(p) = &table.pagination {
        println!(
            "  page {}/{} - {}",
            p.info.current_page + 1,
            p.info.page_count,
            p.info.display_range()
        );
    }
    if let Some(summary) = &table.selection {
        println!("  {} selected", summary.count);
    }
    println!();
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    if let Ok(log_file) = File::create("approval_queue.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let payments = seed_payments();

    let config = TableConfig::new()
        .with_sorting()
        .with_filtering()
        .with_row_selection()
        .with_pagination()
        .with_export()
        .caption("Payments awaiting approval")
        .empty_state("No payments match", Some("Try a different search"))
        .search_debounce(Duration::from_millis(100));

    let table = DataTable::new(columns(), config)
        .with_actions(vec![
            TableAction::new("Approve", |rows: &[Payment]| {
                println!(">> approved {} payment(s)", rows.len());
            })
            .variant(ActionVariant::Primary)
            .requires_selection(),
            TableAction::new("Reject", |rows: &[Payment]| {
                println!(">> rejected {} payment(s)", rows.len());
            })
            .variant(ActionVariant::Destructive)
            .requires_selection()
            .confirm("Reject the selected payments?"),
        ])
        .on_row_click(|p: &Payment| println!(">> opened {}", p.id))
        .on_export(|rows: &[Payment], cols: &[String]| {
            println!(">> exported {} row(s), columns {:?}", rows.len(), cols);
        });

    // Initial load.
    print_view("Loading", &table.render(&payments, &LoadPhase::Loading));
    print_view("First page", &table.render(&payments, &LoadPhase::Ready));

    // Last page of 23 rows at 10 per page, via the wired-up control.
    if let Some(pager) = table.pagination_control(&payments) {
        pager.last_page();
    }
    print_view("Last page", &table.render(&payments, &LoadPhase::Ready));

    // Sort by amount, descending after two toggles.
    table.store().toggle_sort("amount");
    table.store().toggle_sort("amount");
    table.store().set_page_index(0);
    print_view(
        "Sorted by amount (desc)",
        &table.render(&payments, &LoadPhase::Ready),
    );

    // Debounced search: only the last keystroke commits.
    table.search().input("co");
    table.search().input("cob");
    table.search().input("cobalt");
    tokio::time::sleep(Duration::from_millis(200)).await;
    print_view(
        "Search \"cobalt\"",
        &table.render(&payments, &LoadPhase::Ready),
    );

    // Select the visible matches and reject them through the gate.
    table.select_all_visible(&payments);
    let view = table.render(&payments, &LoadPhase::Ready);
    print_view("Selection", &view);

    let outcome = table.invoke_action(&payments, 1);
    println!("invoke Reject -> {outcome:?}");
    if let Some(pending) = table.dispatcher().pending_confirmation() {
        println!("confirm? {}", pending.message);
        table.confirm_action(&payments);
    }
    println!();

    // Back to the full list; a larger page size, with the host resetting
    // the page index the way a page-size picker would.
    table.clear_selection();
    if let Some(pager) = table.pagination_control(&payments) {
        pager.set_page_size(20);
    }
    table.store().set_page_index(0);
    print_view(
        "Page size 20",
        &table.render(&payments, &LoadPhase::Ready),
    );

    // Export respects filters but ignores pagination.
    table.store().set_column_filter("currency", "EUR");
    table.export(&payments);

    table.activate_row(&payments, "pay_0003").ok();
}
