//! Caller-supplied loading phase for the composed table.

use crate::error::TableError;

/// The loading phase of the data behind a table.
///
/// Supplied by the caller on every render cycle - the engine does not fetch
/// data, so it cannot derive this itself. The four phases are mutually
/// exclusive render paths in the composition layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// Data is being fetched; render inert controls and a loading placeholder.
    Loading,
    /// The fetch failed; routed into the crash boundary's fallback.
    Error(TableError),
    /// The fetch succeeded but the collection is known to be empty.
    Empty,
    /// Data is available.
    #[default]
    Ready,
}

impl LoadPhase {
    /// Convenience constructor for an error phase from any message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(TableError::source(message))
    }

    /// Check if data is loading.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if the load failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Check if the load produced no data.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Check if data is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Get the error if present.
    pub fn as_error(&self) -> Option<&TableError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}
