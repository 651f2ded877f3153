//! tablekit - a composable engine for presenting typed collections as
//! interactive tables.
//!
//! The engine owns all interactive table state (sorting, filtering,
//! pagination, row selection, debounced search) and produces an unstyled
//! [`TableView`](table::TableView) matrix for the caller to draw. It never
//! fetches data and never touches a terminal: rows come in, a view model and
//! state-change notifications go out.
//!
//! The composed entry point is [`DataTable`](data_table::DataTable); every
//! sub-facility (state store, pipeline, search control, pagination control,
//! action dispatcher, crash boundary) is also usable on its own.

pub mod actions;
pub mod boundary;
pub mod data_table;
pub mod error;
pub mod loading;
pub mod pagination;
pub mod search;
pub mod selection;
pub mod state;
pub mod table;

pub mod prelude {
    pub use crate::actions::{
        ActionDispatcher, ActionPresentation, ActionVariant, InvokeOutcome, TableAction,
    };
    pub use crate::boundary::{BoundaryState, CrashBoundary, FallbackView, Supervised};
    pub use crate::data_table::DataTable;
    pub use crate::error::TableError;
    pub use crate::loading::LoadPhase;
    pub use crate::pagination::{PageState, PaginationControl, PaginationInfo, PaginationView};
    pub use crate::search::SearchControl;
    pub use crate::selection::Selection;
    pub use crate::state::State;
    pub use crate::table::{
        BodyView, CellValue, ColumnDescriptor, HeaderCell, RowView, SortDirection, SortKey,
        StateChange, StateSnapshot, TableConfig, TableRow, TableStore, TableView,
    };
}
