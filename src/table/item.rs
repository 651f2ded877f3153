//! Row contract and column descriptors.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Trait for records that can be displayed as rows in a table.
///
/// The engine imposes exactly one invariant on the caller's data: a unique,
/// stable identity per row. Everything else - which fields exist and how they
/// are typed - is declared through [`CellValue`]s returned per column.
///
/// # Example
///
/// ```
/// use tablekit::table::{CellValue, TableRow};
///
/// #[derive(Clone)]
/// struct Merchant {
///     id: String,
///     name: String,
///     volume: i64,
/// }
///
/// impl TableRow for Merchant {
///     fn id(&self) -> String {
///         self.id.clone()
///     }
///
///     fn cell(&self, column_id: &str) -> CellValue {
///         match column_id {
///             "name" => CellValue::from(self.name.as_str()),
///             "volume" => CellValue::from(self.volume),
///             _ => CellValue::Empty,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Unique identifier for this row.
    ///
    /// Used to key selection and activation across sorting, filtering, and
    /// data replacement.
    fn id(&self) -> String;

    /// The typed value for the given column.
    ///
    /// Unknown column IDs return [`CellValue::Empty`].
    fn cell(&self, column_id: &str) -> CellValue;
}

/// A typed cell value.
///
/// Sorting and filtering operate on these typed values, not on rendered
/// text, so `10` sorts after `9` and booleans sort false-before-true.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Display text for this value (used by the default renderer and the
    /// default filter predicate).
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Default total order over runtime cell types.
    ///
    /// Empty sorts first; mixed types fall back to comparing display text so
    /// the order is still total.
    pub fn total_order(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Empty, Self::Empty) => Ordering::Equal,
            (Self::Empty, _) => Ordering::Less,
            (_, Self::Empty) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (a, b) => a.display().cmp(&b.display()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for CellValue {
    fn from(i: u32) -> Self {
        Self::Int(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;
type FilterPredicate<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;
type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Declarative description of one table column.
///
/// Columns are immutable for the lifetime of a table instance; visibility is
/// the only per-column attribute the engine toggles at runtime (and that
/// state lives in the store, not here).
///
/// # Example
///
/// ```ignore
/// let columns = vec![
///     ColumnDescriptor::new("name", "Merchant").sortable().searchable(),
///     ColumnDescriptor::new("volume", "Volume").sortable().width(12),
///     ColumnDescriptor::new("status", "Status").filterable(),
/// ];
/// ```
#[derive(Clone)]
pub struct ColumnDescriptor<T: TableRow> {
    /// Unique column identifier, matched against [`TableRow::cell`].
    pub id: String,
    /// Header label.
    pub label: String,
    /// Preferred width in display cells.
    pub width: Option<u16>,
    /// Minimum width.
    pub min_width: Option<u16>,
    /// Maximum width.
    pub max_width: Option<u16>,
    /// Whether the column participates in sorting.
    pub sortable: bool,
    /// Whether the column accepts a per-column filter value.
    pub filterable: bool,
    /// Whether the global search term applies to this column.
    pub searchable: bool,
    /// Whether the column is included in exports.
    pub exportable: bool,
    /// Whether the column is visible before any visibility toggling.
    pub visible_by_default: bool,
    compare: Option<Comparator<T>>,
    filter: Option<FilterPredicate<T>>,
    render: Option<CellRenderer<T>>,
}

impl<T: TableRow> ColumnDescriptor<T> {
    /// Create a new column with the given id and header label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width: None,
            min_width: None,
            max_width: None,
            sortable: false,
            filterable: false,
            searchable: false,
            exportable: false,
            visible_by_default: true,
            compare: None,
            filter: None,
            render: None,
        }
    }

    /// Set the preferred width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the minimum width.
    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Set the maximum width.
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Include the column in global search.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Include the column in exports.
    pub fn exportable(mut self) -> Self {
        self.exportable = true;
        self
    }

    /// Hide the column until visibility is toggled on.
    pub fn hidden(mut self) -> Self {
        self.visible_by_default = false;
        self
    }

    /// Set a custom comparator, overriding the default typed order.
    pub fn with_comparator(
        mut self,
        f: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.compare = Some(Arc::new(f));
        self
    }

    /// Set a custom filter predicate, overriding case-insensitive
    /// containment over the display text.
    pub fn with_filter(mut self, f: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(f));
        self
    }

    /// Set a custom cell renderer, overriding [`CellValue::display`].
    pub fn with_renderer(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    /// The typed value of this column for a row.
    pub fn value(&self, row: &T) -> CellValue {
        row.cell(&self.id)
    }

    /// The display text of this column for a row.
    pub fn text(&self, row: &T) -> String {
        match &self.render {
            Some(render) => render(row),
            None => self.value(row).display(),
        }
    }

    /// Compare two rows by this column.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match &self.compare {
            Some(cmp) => cmp(a, b),
            None => self.value(a).total_order(&self.value(b)),
        }
    }

    /// Check whether a row passes this column's filter for the given value.
    pub fn matches_filter(&self, row: &T, filter_value: &str) -> bool {
        match &self.filter {
            Some(f) => f(row, filter_value),
            None => self
                .text(row)
                .to_lowercase()
                .contains(&filter_value.to_lowercase()),
        }
    }
}

impl<T: TableRow> fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("searchable", &self.searchable)
            .field("exportable", &self.exportable)
            .field("visible_by_default", &self.visible_by_default)
            .finish_non_exhaustive()
    }
}
