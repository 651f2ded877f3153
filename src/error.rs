//! Error types for the table engine.

use std::any::Any;

use thiserror::Error;

/// Errors surfaced through the table engine.
///
/// The engine itself cannot fail during state transitions; errors arise only
/// at its edges: a caller-supplied error phase, a panicking cell renderer
/// caught by the crash boundary, or an activation referencing a row that is
/// no longer in the collection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    /// A render closure panicked inside the crash boundary.
    #[error("render panicked: {message}")]
    RenderPanic { message: String },

    /// The caller reported a data-source failure (`LoadPhase::Error`).
    #[error("data source error: {message}")]
    Source { message: String },

    /// A row activation referenced an ID absent from the current collection.
    #[error("unknown row '{id}'")]
    UnknownRow { id: String },
}

impl TableError {
    /// Create a source error from any message.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
