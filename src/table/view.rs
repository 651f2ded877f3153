//! The unstyled render model produced by the engine.
//!
//! Callers draw these plain-data structures however they like; the engine
//! attaches no colors, no layout, no widget tree - only the facts a
//! renderer needs.

use crate::actions::{ActionPresentation, ActionVariant};
use crate::pagination::PaginationView;

use super::store::SortDirection;

/// Sort indicator for a header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortIndicator {
    pub direction: SortDirection,
    /// Zero-based position in the multi-key sort sequence.
    pub ordinal: usize,
}

impl SortIndicator {
    /// Glyph for this indicator.
    pub fn glyph(&self) -> &'static str {
        match self.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// One rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column_id: String,
    pub label: String,
    pub sortable: bool,
    pub sort: Option<SortIndicator>,
    pub width: Option<u16>,
}

/// One rendered data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub selected: bool,
    /// Cell text, one entry per visible column, in column order.
    pub cells: Vec<String>,
}

/// The table body: either data rows or a single placeholder row spanning
/// all visible columns (keeping header chrome stable when there is nothing
/// to show).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    Rows(Vec<RowView>),
    Empty {
        message: String,
        description: Option<String>,
        /// Number of visible columns the placeholder spans.
        span: usize,
    },
    Loading {
        message: String,
        span: usize,
    },
}

impl BodyView {
    /// The data rows, if any.
    pub fn rows(&self) -> &[RowView] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// The search region: current (shadow) value and whether input is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub value: String,
    pub enabled: bool,
}

/// One action as presented in the action bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    /// Index into the dispatcher's action list.
    pub index: usize,
    pub label: String,
    pub variant: ActionVariant,
    pub needs_confirmation: bool,
}

/// The bulk-action region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBarView {
    /// Inline buttons or a collapsed overflow menu.
    pub presentation: ActionPresentation,
    /// The currently eligible actions only.
    pub actions: Vec<ActionView>,
    pub enabled: bool,
}

/// The selection summary shown when rows are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub count: usize,
}

/// The full rendered table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Caption for assistive technology.
    pub caption: Option<String>,
    pub search: Option<SearchView>,
    pub actions: Option<ActionBarView>,
    /// Present only while rows are selected; clearing it calls `reset_all`.
    pub selection: Option<SelectionSummary>,
    pub header: Vec<HeaderCell>,
    pub body: BodyView,
    pub pagination: Option<PaginationView>,
    pub sticky_header: bool,
}
