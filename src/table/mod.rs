//! Table core - row contract, column descriptors, configuration, state
//! store, row pipeline, and the render model.
//!
//! The pieces compose into [`DataTable`](crate::data_table::DataTable):
//!
//! - [`TableRow`] / [`ColumnDescriptor`] declare what the data looks like.
//! - [`TableConfig`] declares which capabilities are active.
//! - [`TableStore`] owns all interactive state and reports changes.
//! - [`pipeline`] derives the visible rows (filter -> sort -> paginate).
//! - [`TableView`] is the unstyled matrix handed back to the caller.

mod config;
mod item;
pub mod pipeline;
mod store;
mod view;

pub use config::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE, TableConfig};
pub use item::{CellValue, ColumnDescriptor, TableRow};
pub use store::{SortDirection, SortKey, StateChange, StateSnapshot, TableStore};
pub use view::{
    ActionBarView, ActionView, BodyView, HeaderCell, RowView, SearchView, SelectionSummary,
    SortIndicator, TableView,
};
