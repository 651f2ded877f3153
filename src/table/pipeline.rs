//! Row pipeline: filter -> sort -> paginate, in that fixed order.
//!
//! Each stage applies only when its capability is enabled in the
//! configuration; pre-seeded state for a disabled feature is carried but
//! not applied. The pipeline is pure over a state snapshot, so the final
//! output depends only on the accumulated state, never on the order the
//! store reached it.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::config::TableConfig;
use super::item::{ColumnDescriptor, TableRow};
use super::store::{SortDirection, StateSnapshot};

/// Output of one pipeline run.
#[derive(Debug)]
pub struct PipelineOutput<'a, T: TableRow> {
    /// The rows of the current page, in final display order.
    pub page_rows: Vec<&'a T>,
    /// Total rows surviving the filter stage (the pagination domain).
    pub filtered_total: usize,
}

/// The columns currently visible, honoring runtime visibility overrides
/// only when the capability is enabled.
pub fn visible_columns<'a, T: TableRow>(
    columns: &'a [ColumnDescriptor<T>],
    state: &StateSnapshot,
    config: &TableConfig,
) -> Vec<&'a ColumnDescriptor<T>> {
    columns
        .iter()
        .filter(|col| {
            if config.enable_column_visibility {
                state
                    .column_visibility
                    .get(&col.id)
                    .copied()
                    .unwrap_or(col.visible_by_default)
            } else {
                col.visible_by_default
            }
        })
        .collect()
}

/// Run the full pipeline over a row collection.
pub fn run<'a, T: TableRow>(
    rows: &'a [T],
    columns: &[ColumnDescriptor<T>],
    state: &StateSnapshot,
    config: &TableConfig,
) -> PipelineOutput<'a, T> {
    let mut visible: Vec<&'a T> = if config.enable_filtering {
        let search = search_matcher(state, columns, config);
        rows.iter()
            .filter(|row| passes_column_filters(*row, columns, state))
            .filter(|row| match &search {
                Some(m) => m.matches(row),
                None => true,
            })
            .collect()
    } else {
        rows.iter().collect()
    };

    if config.enable_sorting && !state.sorting.is_empty() {
        // Stable sort keeps the caller's relative order for ties.
        visible.sort_by(|a, b| {
            for key in &state.sorting {
                let Some(col) = columns.iter().find(|c| c.id == key.column_id) else {
                    continue;
                };
                if !col.sortable {
                    continue;
                }
                let ord = match key.direction {
                    SortDirection::Ascending => col.compare(a, b),
                    SortDirection::Descending => col.compare(a, b).reverse(),
                };
                if ord != std::cmp::Ordering::Equal {
                    return ord;
                }
            }
            std::cmp::Ordering::Equal
        });
    }

    let filtered_total = visible.len();

    let page_rows = if config.enable_pagination {
        let size = state.pagination.page_size.max(1);
        let start = state.pagination.page_index.saturating_mul(size);
        visible
            .into_iter()
            .skip(start)
            .take(size)
            .collect()
    } else {
        visible
    };

    PipelineOutput {
        page_rows,
        filtered_total,
    }
}

fn passes_column_filters<T: TableRow>(
    row: &T,
    columns: &[ColumnDescriptor<T>],
    state: &StateSnapshot,
) -> bool {
    state.column_filters.iter().all(|(column_id, value)| {
        match columns.iter().find(|c| &c.id == column_id) {
            Some(col) if col.filterable => col.matches_filter(row, value),
            // Filters for unknown or non-filterable columns are inert.
            _ => true,
        }
    })
}

/// Prepared global-search matcher: one pattern, the searchable column set.
struct SearchMatcher<'a, T: TableRow> {
    pattern: Pattern,
    columns: Vec<&'a ColumnDescriptor<T>>,
}

impl<T: TableRow> SearchMatcher<'_, T> {
    /// OR across searchable columns: the row matches if any column's text
    /// matches the term.
    fn matches(&self, row: &T) -> bool {
        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();
        self.columns.iter().any(|col| {
            let text = col.text(row);
            let haystack = Utf32Str::new(&text, &mut buf);
            self.pattern.score(haystack, &mut matcher).is_some()
        })
    }
}

fn search_matcher<'a, T: TableRow>(
    state: &StateSnapshot,
    columns: &'a [ColumnDescriptor<T>],
    config: &TableConfig,
) -> Option<SearchMatcher<'a, T>> {
    if state.search.is_empty() {
        return None;
    }

    let searchable: Vec<&ColumnDescriptor<T>> = match &config.searchable_columns {
        Some(ids) => columns.iter().filter(|c| ids.contains(&c.id)).collect(),
        None => columns.iter().filter(|c| c.searchable).collect(),
    };
    if searchable.is_empty() {
        return None;
    }

    // Substring atoms so the term behaves as case-insensitive containment
    // rather than fuzzy scoring.
    let pattern = Pattern::new(
        &state.search,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Substring,
    );

    Some(SearchMatcher {
        pattern,
        columns: searchable,
    })
}
