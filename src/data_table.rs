//! The composed table - one configurable unit wiring the state store,
//! search control, action dispatcher, renderer, pagination, and crash
//! boundary together.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::warn;

use crate::actions::{ActionDispatcher, InvokeOutcome, TableAction};
use crate::boundary::{CrashBoundary, FallbackView, Supervised};
use crate::error::TableError;
use crate::loading::LoadPhase;
use crate::pagination::{PaginationControl, PaginationInfo};
use crate::search::SearchControl;
use crate::table::{
    ActionBarView, ActionView, BodyView, ColumnDescriptor, HeaderCell, RowView, SearchView,
    SelectionSummary, SortIndicator, StateChange, TableConfig, TableRow, TableStore, TableView,
    pipeline,
};

type RowClickFn<T> = Arc<dyn Fn(&T) + Send + Sync>;
type ExportFn<T> = Arc<dyn Fn(&[T], &[String]) + Send + Sync>;

/// A complete interactive table over a caller-supplied row collection.
///
/// The caller owns the rows and supplies them (with a [`LoadPhase`]) on
/// every render cycle; the table owns all interactive state in between and
/// reports changes through `on_state_change`.
///
/// # Example
///
/// ```ignore
/// let table = DataTable::new(columns, TableConfig::new()
///         .with_sorting()
///         .with_filtering()
///         .with_row_selection()
///         .with_pagination())
///     .with_actions(vec![approve, reject])
///     .on_row_click(|row| open_detail(row));
///
/// let view = table.render(&rows, &LoadPhase::Ready);
/// ```
pub struct DataTable<T: TableRow> {
    config: TableConfig,
    columns: Vec<ColumnDescriptor<T>>,
    store: TableStore,
    search: SearchControl,
    dispatcher: ActionDispatcher<T>,
    boundary: CrashBoundary,
    on_row_click: Option<RowClickFn<T>>,
    on_export: Option<ExportFn<T>>,
}

impl<T: TableRow> DataTable<T> {
    /// Create a table from column descriptors and configuration.
    ///
    /// The state store is created here with the configured default page
    /// size and discarded with the table.
    pub fn new(columns: Vec<ColumnDescriptor<T>>, config: TableConfig) -> Self {
        let store = TableStore::new(config.page_size);
        let commit_store = store.clone();
        let search = SearchControl::new(move |value| commit_store.set_global_filter(value))
            .with_delay(config.search_debounce);
        Self {
            config,
            columns,
            store,
            search,
            dispatcher: ActionDispatcher::new(Vec::new()),
            boundary: CrashBoundary::new(),
            on_row_click: None,
            on_export: None,
        }
    }

    /// Configure the bulk actions.
    pub fn with_actions(mut self, actions: Vec<TableAction<T>>) -> Self {
        self.dispatcher = ActionDispatcher::new(actions);
        self
    }

    /// Set the row activation callback. Fires exactly once per activation.
    pub fn on_row_click(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Arc::new(f));
        self
    }

    /// Set the export callback. Receives the filtered and sorted rows (not
    /// paginated) and the exportable visible column IDs.
    pub fn on_export(mut self, f: impl Fn(&[T], &[String]) + Send + Sync + 'static) -> Self {
        self.on_export = Some(Arc::new(f));
        self
    }

    /// Register the state-change observer on the underlying store.
    pub fn on_state_change(self, f: impl Fn(&StateChange) + Send + Sync + 'static) -> Self {
        self.store.set_on_state_change(f);
        self
    }

    // -------------------------------------------------------------------------
    // Component access
    // -------------------------------------------------------------------------

    /// The state store handle.
    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// The debounced search control.
    pub fn search(&self) -> &SearchControl {
        &self.search
    }

    /// The bulk action dispatcher.
    pub fn dispatcher(&self) -> &ActionDispatcher<T> {
        &self.dispatcher
    }

    /// The crash isolation boundary.
    pub fn boundary(&self) -> &CrashBoundary {
        &self.boundary
    }

    /// The configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The column descriptors.
    pub fn columns(&self) -> &[ColumnDescriptor<T>] {
        &self.columns
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Render one cycle: sequence the loading phase, supervise the build,
    /// and produce the view model or the boundary's fallback.
    pub fn render(&self, rows: &[T], phase: &LoadPhase) -> Supervised<TableView> {
        match phase {
            // Inert controls, stable layout, no store mutation.
            LoadPhase::Loading => Supervised::Rendered(self.loading_view()),
            // Caller errors unify with render panics on the one fallback
            // path instead of a second inline error presentation.
            LoadPhase::Error(error) => {
                self.boundary.fault(error.clone());
                Supervised::Fallback(FallbackView::from_error(error.clone()))
            }
            LoadPhase::Empty | LoadPhase::Ready => {
                if self.config.enable_row_selection {
                    let live: HashSet<String> = rows.iter().map(|r| r.id()).collect();
                    self.store.sync_rows(&live);
                }
                let force_empty = phase.is_empty();
                self.boundary
                    .supervise(|| self.build_view(rows, force_empty))
            }
        }
    }

    fn build_view(&self, rows: &[T], force_empty: bool) -> TableView {
        let state = self.store.snapshot();
        let visible = pipeline::visible_columns(&self.columns, &state, &self.config);
        let header = self.header_cells(&visible);
        let out = pipeline::run(rows, &self.columns, &state, &self.config);

        let body = if force_empty || out.page_rows.is_empty() {
            BodyView::Empty {
                message: self.config.empty_state_message.clone(),
                description: self.config.empty_state_description.clone(),
                span: visible.len().max(1),
            }
        } else {
            let row_views = out
                .page_rows
                .iter()
                .map(|row| RowView {
                    id: row.id(),
                    selected: self.config.enable_row_selection
                        && self.store.is_selected(&row.id()),
                    cells: visible.iter().map(|col| col.text(row)).collect(),
                })
                .collect();
            BodyView::Rows(row_views)
        };

        let selection = (self.config.enable_row_selection && self.store.has_selection())
            .then(|| SelectionSummary {
                count: self.store.selected_row_count(),
            });

        let actions = (!self.dispatcher.is_empty()).then(|| {
            let selected = self.selected_rows(rows);
            self.action_bar(&selected, true)
        });

        let pagination = self.config.enable_pagination.then(|| {
            let info = PaginationInfo::derive(out.filtered_total, state.pagination);
            PaginationControl::new(info)
                .page_size_options(self.config.page_size_options.clone())
                .view()
        });

        TableView {
            caption: self.config.caption.clone(),
            search: self.search_view(true),
            actions,
            selection,
            header,
            body,
            pagination,
            sticky_header: self.config.sticky_header,
        }
    }

    /// The loading-phase view: structurally similar, inert controls.
    fn loading_view(&self) -> TableView {
        let state = self.store.snapshot();
        let visible = pipeline::visible_columns(&self.columns, &state, &self.config);
        let actions =
            (!self.dispatcher.is_empty()).then(|| self.action_bar(&[], false));

        TableView {
            caption: self.config.caption.clone(),
            search: self.search_view(false),
            actions,
            selection: None,
            header: self.header_cells(&visible),
            body: BodyView::Loading {
                message: self.config.loading_message.clone(),
                span: visible.len().max(1),
            },
            pagination: None,
            sticky_header: self.config.sticky_header,
        }
    }

    fn header_cells(&self, visible: &[&ColumnDescriptor<T>]) -> Vec<HeaderCell> {
        let sorting = self.store.sorting();
        visible
            .iter()
            .map(|col| {
                let sort = self
                    .config
                    .enable_sorting
                    .then(|| {
                        sorting
                            .iter()
                            .position(|k| k.column_id == col.id)
                            .map(|ordinal| SortIndicator {
                                direction: sorting[ordinal].direction,
                                ordinal,
                            })
                    })
                    .flatten();
                HeaderCell {
                    column_id: col.id.clone(),
                    label: col.label.clone(),
                    sortable: self.config.enable_sorting && col.sortable,
                    sort,
                    width: col.width,
                }
            })
            .collect()
    }

    fn search_view(&self, enabled: bool) -> Option<SearchView> {
        self.config.enable_filtering.then(|| SearchView {
            value: self.search.value(),
            enabled,
        })
    }

    fn action_bar(&self, selected: &[T], enabled: bool) -> ActionBarView {
        let eligible = self.dispatcher.eligible(selected);
        let actions: Vec<ActionView> = eligible
            .into_iter()
            .map(|index| {
                let action = &self.dispatcher.actions()[index];
                ActionView {
                    index,
                    label: action.label.clone(),
                    variant: action.variant,
                    needs_confirmation: action.confirmation_message.is_some(),
                }
            })
            .collect();
        ActionBarView {
            presentation: ActionDispatcher::<T>::presentation(actions.len()),
            actions,
            enabled,
        }
    }

    // -------------------------------------------------------------------------
    // Interactions
    // -------------------------------------------------------------------------

    /// Activate a row by ID, firing `on_row_click` exactly once.
    pub fn activate_row(&self, rows: &[T], id: &str) -> Result<(), TableError> {
        let row = rows
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| TableError::UnknownRow { id: id.to_string() })?;
        if let Some(f) = &self.on_row_click {
            f(row);
        }
        Ok(())
    }

    /// Toggle selection of one row. No-op when selection is disabled.
    pub fn toggle_row(&self, id: &str) {
        if self.config.enable_row_selection {
            self.store.toggle_row(id);
        }
    }

    /// Select every row currently visible (after filter, sort, and page).
    pub fn select_all_visible(&self, rows: &[T]) {
        if !self.config.enable_row_selection {
            return;
        }
        let state = self.store.snapshot();
        let out = pipeline::run(rows, &self.columns, &state, &self.config);
        let ids: Vec<String> = out.page_rows.iter().map(|r| r.id()).collect();
        self.store.select_all(&ids);
    }

    /// The clear-selection affordance on the selection summary: restores
    /// every state slice to its defaults.
    pub fn clear_selection(&self) {
        self.store.reset_all();
        self.search.sync("");
    }

    /// The rows currently selected, in collection order.
    pub fn selected_rows(&self, rows: &[T]) -> Vec<T> {
        rows.iter()
            .filter(|r| self.store.is_selected(&r.id()))
            .cloned()
            .collect()
    }

    /// Invoke a bulk action against the current selection.
    pub fn invoke_action(&self, rows: &[T], index: usize) -> InvokeOutcome {
        let selected = self.selected_rows(rows);
        self.dispatcher.invoke(index, &selected)
    }

    /// Affirm the pending confirmation. Returns true if a handler ran.
    pub fn confirm_action(&self, rows: &[T]) -> bool {
        let selected = self.selected_rows(rows);
        self.dispatcher.confirm(&selected)
    }

    /// Dismiss the pending confirmation without executing.
    pub fn cancel_action(&self) {
        self.dispatcher.cancel();
    }

    /// Clear the boundary's captured error so the next render re-mounts.
    pub fn retry(&self) {
        self.boundary.retry();
    }

    /// An interactive pagination control over the current filtered total,
    /// with navigation wired back to the store.
    ///
    /// Page changes land in `set_page_index`; size changes land in
    /// `set_page_size` and leave the index alone, as the control's contract
    /// requires. Returns `None` when pagination is disabled.
    pub fn pagination_control(&self, rows: &[T]) -> Option<PaginationControl> {
        if !self.config.enable_pagination {
            return None;
        }
        let state = self.store.snapshot();
        let out = pipeline::run(rows, &self.columns, &state, &self.config);
        let info = PaginationInfo::derive(out.filtered_total, state.pagination);
        let pager = self.store.clone();
        let sizer = self.store.clone();
        Some(
            PaginationControl::new(info)
                .page_size_options(self.config.page_size_options.clone())
                .on_page_change(move |page| pager.set_page_index(page))
                .on_page_size_change(move |size| sizer.set_page_size(size)),
        )
    }

    /// Invoke the export callback with the filtered and sorted (not
    /// paginated) rows and the exportable visible column IDs.
    ///
    /// Returns true if the callback was invoked. Disabled export or a
    /// missing callback degrades silently.
    pub fn export(&self, rows: &[T]) -> bool {
        if !self.config.enable_export {
            return false;
        }
        let Some(on_export) = &self.on_export else {
            warn!("export enabled but no export callback configured");
            return false;
        };

        let state = self.store.snapshot();
        let mut unpaginated = self.config.clone();
        unpaginated.enable_pagination = false;
        let out = pipeline::run(rows, &self.columns, &state, &unpaginated);
        let exported: Vec<T> = out.page_rows.into_iter().cloned().collect();

        let column_ids: Vec<String> = pipeline::visible_columns(&self.columns, &state, &self.config)
            .into_iter()
            .filter(|c| c.exportable)
            .map(|c| c.id.clone())
            .collect();

        on_export(&exported, &column_ids);
        true
    }
}

impl<T: TableRow> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
