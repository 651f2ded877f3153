//! Table state store - the single source of truth for interactive state.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::pagination::PageState;
use crate::selection::Selection;

/// Sort direction for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Flip the direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// One entry of the ordered multi-key sort sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Create an ascending sort key.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Create a descending sort key.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// The slice of state reported through `on_state_change`.
///
/// Each setter reports exactly the slice it changed, so an external owner
/// (a page persisting table state in the URL, say) can observe deltas
/// without diffing snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Sorting(Vec<SortKey>),
    ColumnFilters(HashMap<String, String>),
    ColumnVisibility(HashMap<String, bool>),
    Selection(Vec<String>),
    GlobalFilter(String),
    Pagination(PageState),
}

/// A serializable copy of the full interactive state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub sorting: Vec<SortKey>,
    pub column_filters: HashMap<String, String>,
    pub column_visibility: HashMap<String, bool>,
    pub selected: Vec<String>,
    pub search: String,
    pub pagination: PageState,
}

/// Construction-time defaults the reset operations restore.
#[derive(Debug, Clone, Copy)]
struct PageStateDefaults {
    page_size: usize,
}

#[derive(Debug)]
struct StoreInner {
    sorting: Vec<SortKey>,
    column_filters: HashMap<String, String>,
    column_visibility: HashMap<String, bool>,
    selection: Selection,
    search: String,
    pagination: PageState,
    defaults: PageStateDefaults,
}

impl StoreInner {
    fn new(default_page_size: usize) -> Self {
        let defaults = PageStateDefaults {
            page_size: default_page_size.max(1),
        };
        Self {
            sorting: Vec::new(),
            column_filters: HashMap::new(),
            column_visibility: HashMap::new(),
            selection: Selection::new(),
            search: String::new(),
            pagination: PageState::new(0, defaults.page_size),
            defaults,
        }
    }
}

type StateChangeFn = Arc<dyn Fn(&StateChange) + Send + Sync>;

/// Single source of truth for all interactive table state.
///
/// One store per table instance, created at construction and discarded at
/// teardown; cloning produces another handle to the same state. All
/// operations are infallible, synchronous state transitions - no network,
/// no I/O.
pub struct TableStore {
    inner: Arc<RwLock<StoreInner>>,
    dirty: Arc<AtomicBool>,
    on_change: Arc<RwLock<Option<StateChangeFn>>>,
}

impl TableStore {
    /// Create a store whose resets restore the given default page size.
    pub fn new(default_page_size: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::new(default_page_size))),
            dirty: Arc::new(AtomicBool::new(false)),
            on_change: Arc::new(RwLock::new(None)),
        }
    }

    /// Register the state-change observer. Replaces any previous observer.
    pub fn set_on_state_change(&self, f: impl Fn(&StateChange) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.on_change.write() {
            *guard = Some(Arc::new(f));
        }
    }

    fn emit(&self, change: StateChange) {
        debug!("table state change: {change:?}");
        self.dirty.store(true, Ordering::SeqCst);
        let callback = self
            .on_change
            .read()
            .ok()
            .and_then(|guard| (*guard).clone());
        if let Some(f) = callback {
            f(&change);
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get the ordered sort sequence.
    pub fn sorting(&self) -> Vec<SortKey> {
        self.inner
            .read()
            .map(|g| g.sorting.clone())
            .unwrap_or_default()
    }

    /// Replace the sort sequence.
    pub fn set_sorting(&self, sorting: Vec<SortKey>) {
        self.update_sorting(|s| *s = sorting);
    }

    /// Mutate the sort sequence through a closure of the previous value.
    pub fn update_sorting(&self, f: impl FnOnce(&mut Vec<SortKey>)) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            f(&mut guard.sorting);
            Some(guard.sorting.clone())
        } else {
            None
        };
        if let Some(sorting) = changed {
            self.emit(StateChange::Sorting(sorting));
        }
    }

    /// Toggle sort for a column: absent -> ascending -> descending -> absent.
    ///
    /// The column becomes the primary sort key; other keys are kept in order
    /// behind it.
    pub fn toggle_sort(&self, column_id: &str) {
        self.update_sorting(|sorting| {
            match sorting.iter().position(|k| k.column_id == column_id) {
                Some(pos) => {
                    let key = sorting.remove(pos);
                    match key.direction {
                        SortDirection::Ascending => {
                            sorting.insert(
                                0,
                                SortKey {
                                    column_id: key.column_id,
                                    direction: SortDirection::Descending,
                                },
                            );
                        }
                        SortDirection::Descending => {}
                    }
                }
                None => sorting.insert(0, SortKey::asc(column_id)),
            }
        });
    }

    /// Restore sorting to its default (no sort keys).
    pub fn reset_sorting(&self) {
        self.set_sorting(Vec::new());
    }

    // -------------------------------------------------------------------------
    // Column filters
    // -------------------------------------------------------------------------

    /// Get all column filters.
    pub fn column_filters(&self) -> HashMap<String, String> {
        self.inner
            .read()
            .map(|g| g.column_filters.clone())
            .unwrap_or_default()
    }

    /// Replace all column filters.
    pub fn set_column_filters(&self, filters: HashMap<String, String>) {
        self.update_column_filters(|f| *f = filters);
    }

    /// Mutate the column filters through a closure of the previous value.
    pub fn update_column_filters(&self, f: impl FnOnce(&mut HashMap<String, String>)) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            f(&mut guard.column_filters);
            Some(guard.column_filters.clone())
        } else {
            None
        };
        if let Some(filters) = changed {
            self.emit(StateChange::ColumnFilters(filters));
        }
    }

    /// Set one column's filter value. An empty value removes the entry.
    pub fn set_column_filter(&self, column_id: &str, value: impl Into<String>) {
        let value = value.into();
        self.update_column_filters(|filters| {
            if value.is_empty() {
                filters.remove(column_id);
            } else {
                filters.insert(column_id.to_string(), value);
            }
        });
    }

    /// Restore filters to their default: no column filters, empty search.
    pub fn reset_filters(&self) {
        self.set_column_filters(HashMap::new());
        let search_changed = if let Ok(mut guard) = self.inner.write() {
            if guard.search.is_empty() {
                false
            } else {
                guard.search.clear();
                true
            }
        } else {
            false
        };
        if search_changed {
            self.emit(StateChange::GlobalFilter(String::new()));
        }
    }

    // -------------------------------------------------------------------------
    // Column visibility
    // -------------------------------------------------------------------------

    /// Get the visibility overrides (absent means default visibility).
    pub fn column_visibility(&self) -> HashMap<String, bool> {
        self.inner
            .read()
            .map(|g| g.column_visibility.clone())
            .unwrap_or_default()
    }

    /// Replace the visibility overrides.
    pub fn set_column_visibility(&self, visibility: HashMap<String, bool>) {
        self.update_column_visibility(|v| *v = visibility);
    }

    /// Mutate the visibility overrides through a closure of the previous value.
    pub fn update_column_visibility(&self, f: impl FnOnce(&mut HashMap<String, bool>)) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            f(&mut guard.column_visibility);
            Some(guard.column_visibility.clone())
        } else {
            None
        };
        if let Some(visibility) = changed {
            self.emit(StateChange::ColumnVisibility(visibility));
        }
    }

    /// Toggle visibility of one column relative to its current effective state.
    pub fn toggle_column(&self, column_id: &str, default_visible: bool) {
        self.update_column_visibility(|visibility| {
            let current = visibility.get(column_id).copied().unwrap_or(default_visible);
            visibility.insert(column_id.to_string(), !current);
        });
    }

    /// Drop all visibility overrides, restoring declared defaults.
    pub fn reset_column_visibility(&self) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            if guard.column_visibility.is_empty() {
                false
            } else {
                guard.column_visibility.clear();
                true
            }
        } else {
            false
        };
        if changed {
            self.emit(StateChange::ColumnVisibility(HashMap::new()));
        }
    }

    /// Whether a column is visible, given its declared default.
    pub fn is_column_visible(&self, column_id: &str, default_visible: bool) -> bool {
        self.inner
            .read()
            .map(|g| {
                g.column_visibility
                    .get(column_id)
                    .copied()
                    .unwrap_or(default_visible)
            })
            .unwrap_or(default_visible)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Get the selected row IDs (sorted).
    pub fn selected_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.selection.selected())
            .unwrap_or_default()
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(id))
            .unwrap_or(false)
    }

    /// Replace the selected set.
    pub fn set_selection(&self, ids: Vec<String>) {
        self.update_selection(|sel| sel.replace(ids));
    }

    /// Mutate the selection through a closure of the previous value.
    pub fn update_selection(&self, f: impl FnOnce(&mut Selection)) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            f(&mut guard.selection);
            Some(guard.selection.selected())
        } else {
            None
        };
        if let Some(selected) = changed {
            self.emit(StateChange::Selection(selected));
        }
    }

    /// Toggle selection of one row.
    pub fn toggle_row(&self, id: &str) {
        self.update_selection(|sel| {
            sel.toggle(id);
        });
    }

    /// Select all of the given row IDs (visible rows, typically).
    pub fn select_all(&self, ids: &[String]) {
        self.update_selection(|sel| {
            sel.select_all(ids);
        });
    }

    /// Restore selection to its default (nothing selected).
    pub fn reset_selection(&self) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            if guard.selection.is_empty() {
                false
            } else {
                guard.selection.clear();
                true
            }
        } else {
            false
        };
        if changed {
            self.emit(StateChange::Selection(Vec::new()));
        }
    }

    /// Prune selection entries whose IDs are absent from the new row
    /// collection.
    ///
    /// Called on wholesale data replacement - never on filter changes, so a
    /// row hidden by a filter stays selected. Emits a `Selection` change only
    /// when something was actually dropped.
    pub fn sync_rows(&self, live_ids: &HashSet<String>) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            let dropped = guard.selection.retain(live_ids);
            if dropped.is_empty() {
                None
            } else {
                debug!("pruned {} stale selection entries", dropped.len());
                Some(guard.selection.selected())
            }
        } else {
            None
        };
        if let Some(selected) = changed {
            self.emit(StateChange::Selection(selected));
        }
    }

    // -------------------------------------------------------------------------
    // Global filter
    // -------------------------------------------------------------------------

    /// Get the global search term.
    pub fn global_filter(&self) -> String {
        self.inner
            .read()
            .map(|g| g.search.clone())
            .unwrap_or_default()
    }

    /// Set the global search term.
    ///
    /// Changing the filter domain invalidates the previous page position, so
    /// this also resets `page_index` to 0.
    pub fn set_global_filter(&self, value: impl Into<String>) {
        let value = value.into();
        let page_reset = if let Ok(mut guard) = self.inner.write() {
            guard.search = value.clone();
            if guard.pagination.page_index != 0 {
                guard.pagination.page_index = 0;
                Some(guard.pagination)
            } else {
                None
            }
        } else {
            None
        };
        self.emit(StateChange::GlobalFilter(value));
        if let Some(pagination) = page_reset {
            self.emit(StateChange::Pagination(pagination));
        }
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Get the page state.
    pub fn pagination(&self) -> PageState {
        self.inner
            .read()
            .map(|g| g.pagination)
            .unwrap_or_default()
    }

    /// Replace the page state. No cross-field side effects.
    pub fn set_pagination(&self, pagination: PageState) {
        self.update_pagination(|p| *p = pagination);
    }

    /// Mutate the page state through a closure of the previous value.
    pub fn update_pagination(&self, f: impl FnOnce(&mut PageState)) {
        let changed = if let Ok(mut guard) = self.inner.write() {
            f(&mut guard.pagination);
            guard.pagination.page_size = guard.pagination.page_size.max(1);
            Some(guard.pagination)
        } else {
            None
        };
        if let Some(pagination) = changed {
            self.emit(StateChange::Pagination(pagination));
        }
    }

    /// Set the page index.
    pub fn set_page_index(&self, page_index: usize) {
        self.update_pagination(|p| p.page_index = page_index);
    }

    /// Set the page size. Does not reset the page index - that is the
    /// caller's call.
    pub fn set_page_size(&self, page_size: usize) {
        self.update_pagination(|p| p.page_size = page_size.max(1));
    }

    /// Restore pagination to its default (first page, configured page size).
    pub fn reset_pagination(&self) {
        let default_size = self
            .inner
            .read()
            .map(|g| g.defaults.page_size)
            .unwrap_or(crate::table::DEFAULT_PAGE_SIZE);
        self.set_pagination(PageState::new(0, default_size));
    }

    // -------------------------------------------------------------------------
    // Aggregate operations
    // -------------------------------------------------------------------------

    /// Restore every slice to the defaults used at construction.
    pub fn reset_all(&self) {
        self.reset_sorting();
        self.reset_filters();
        self.reset_column_visibility();
        self.reset_selection();
        self.reset_pagination();
    }

    /// Derived: whether any column filter or the global filter is active.
    pub fn has_active_filters(&self) -> bool {
        self.inner
            .read()
            .map(|g| !g.column_filters.is_empty() || !g.search.is_empty())
            .unwrap_or(false)
    }

    /// Derived: whether any row is selected.
    pub fn has_selection(&self) -> bool {
        self.selected_row_count() > 0
    }

    /// Derived: how many rows are selected.
    pub fn selected_row_count(&self) -> usize {
        self.inner.read().map(|g| g.selection.len()).unwrap_or(0)
    }

    /// Take a serializable snapshot of the full state.
    pub fn snapshot(&self) -> StateSnapshot {
        self.inner
            .read()
            .map(|g| StateSnapshot {
                sorting: g.sorting.clone(),
                column_filters: g.column_filters.clone(),
                column_visibility: g.column_visibility.clone(),
                selected: g.selection.selected(),
                search: g.search.clone(),
                pagination: g.pagination,
            })
            .unwrap_or_default()
    }

    /// Restore state from a snapshot without emitting change notifications.
    ///
    /// The snapshot came from the external owner in the first place; echoing
    /// it back would loop.
    pub fn restore(&self, snapshot: StateSnapshot) {
        if let Ok(mut guard) = self.inner.write() {
            guard.sorting = snapshot.sorting;
            guard.column_filters = snapshot.column_filters;
            guard.column_visibility = snapshot.column_visibility;
            guard.selection.replace(snapshot.selected);
            guard.search = snapshot.search;
            guard.pagination =
                PageState::new(snapshot.pagination.page_index, snapshot.pagination.page_size);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the state has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for TableStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            on_change: Arc::clone(&self.on_change),
        }
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new(crate::table::DEFAULT_PAGE_SIZE)
    }
}

impl std::fmt::Debug for TableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableStore")
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}
