//! Declarative table configuration.

use std::time::Duration;

/// Default page size when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default debounce delay for the search control.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Configuration for a composed table.
///
/// Every capability is independently toggleable and defaults to disabled.
/// Disabled capabilities are not applied even if the state store carries
/// values for them - a caller can pre-seed state without activating a
/// feature.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub enable_sorting: bool,
    pub enable_filtering: bool,
    pub enable_row_selection: bool,
    pub enable_pagination: bool,
    pub enable_column_visibility: bool,
    pub enable_export: bool,
    pub sticky_header: bool,
    /// Default rows per page. Also the value `reset_pagination` restores.
    pub page_size: usize,
    /// Page sizes offered by the pagination control.
    pub page_size_options: Vec<usize>,
    /// Delay before a search keystroke commits to the store.
    pub search_debounce: Duration,
    /// Narrow global search to these column IDs. `None` means every column
    /// marked searchable.
    pub searchable_columns: Option<Vec<String>>,
    /// Caption rendered for assistive technology.
    pub caption: Option<String>,
    /// Headline for the empty-state placeholder row.
    pub empty_state_message: String,
    /// Secondary text for the empty-state placeholder row.
    pub empty_state_description: Option<String>,
    /// Text for the loading placeholder.
    pub loading_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            enable_sorting: false,
            enable_filtering: false,
            enable_row_selection: false,
            enable_pagination: false,
            enable_column_visibility: false,
            enable_export: false,
            sticky_header: false,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 50],
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            searchable_columns: None,
            caption: None,
            empty_state_message: "No results".to_string(),
            empty_state_description: None,
            loading_message: "Loading...".to_string(),
        }
    }
}

impl TableConfig {
    /// Create a configuration with everything disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable sorting.
    pub fn with_sorting(mut self) -> Self {
        self.enable_sorting = true;
        self
    }

    /// Enable column filters and global search.
    pub fn with_filtering(mut self) -> Self {
        self.enable_filtering = true;
        self
    }

    /// Enable row selection.
    pub fn with_row_selection(mut self) -> Self {
        self.enable_row_selection = true;
        self
    }

    /// Enable pagination.
    pub fn with_pagination(mut self) -> Self {
        self.enable_pagination = true;
        self
    }

    /// Enable runtime column visibility toggling.
    pub fn with_column_visibility(mut self) -> Self {
        self.enable_column_visibility = true;
        self
    }

    /// Enable the export surface.
    pub fn with_export(mut self) -> Self {
        self.enable_export = true;
        self
    }

    /// Keep the header row pinned while the body scrolls.
    pub fn with_sticky_header(mut self) -> Self {
        self.sticky_header = true;
        self
    }

    /// Set the default page size. Zero is clamped to 1.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Set the page sizes offered by the pagination control.
    pub fn page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Set the search debounce delay.
    pub fn search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// Narrow global search to specific columns.
    pub fn searchable_columns(mut self, ids: Vec<impl Into<String>>) -> Self {
        self.searchable_columns = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Set the accessibility caption.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the empty-state message and optional description.
    pub fn empty_state(
        mut self,
        message: impl Into<String>,
        description: Option<impl Into<String>>,
    ) -> Self {
        self.empty_state_message = message.into();
        self.empty_state_description = description.map(Into::into);
        self
    }

    /// Set the loading placeholder text.
    pub fn loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }
}
