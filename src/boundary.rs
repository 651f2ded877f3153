//! Crash isolation boundary.
//!
//! Supervises the composed render: a panic anywhere in the render closure
//! (a column renderer choking on a malformed value, say) is caught here and
//! replaced with a recoverable fallback, containing the blast radius to the
//! table subtree instead of the whole page.
//!
//! State machine: `Healthy -> (panic) -> Faulted -> (retry) -> Healthy`.
//! There is no automatic retry, and recovery is best-effort - state inside
//! the crashed subtree is not guaranteed to survive.

use std::panic::{AssertUnwindSafe, catch_unwind};

use log::error;

use crate::error::{TableError, extract_panic_message};
use crate::state::State;

/// Supervision state of the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoundaryState {
    #[default]
    Healthy,
    Faulted(TableError),
}

/// The fallback view substituted for a crashed subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackView {
    pub error: TableError,
    /// Human-readable message for the fallback region.
    pub message: String,
    /// A retry affordance is always offered.
    pub can_retry: bool,
}

impl FallbackView {
    /// Build the fallback presentation for a captured error.
    pub fn from_error(error: TableError) -> Self {
        let message = error.to_string();
        Self {
            error,
            message,
            can_retry: true,
        }
    }
}

/// Result of a supervised render.
#[derive(Debug)]
pub enum Supervised<V> {
    /// The render succeeded.
    Rendered(V),
    /// The subtree is faulted; show the fallback instead.
    Fallback(FallbackView),
}

impl<V> Supervised<V> {
    /// The rendered value, if the render succeeded.
    pub fn rendered(self) -> Option<V> {
        match self {
            Self::Rendered(v) => Some(v),
            Self::Fallback(_) => None,
        }
    }

    /// The fallback, if the subtree is faulted.
    pub fn fallback(&self) -> Option<&FallbackView> {
        match self {
            Self::Fallback(f) => Some(f),
            Self::Rendered(_) => None,
        }
    }
}

/// Supervisor wrapping the composed table render.
#[derive(Debug, Clone, Default)]
pub struct CrashBoundary {
    state: State<BoundaryState>,
}

impl CrashBoundary {
    /// Create a healthy boundary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current supervision state.
    pub fn state(&self) -> BoundaryState {
        self.state.get()
    }

    /// Whether the boundary is holding a captured error.
    pub fn is_faulted(&self) -> bool {
        matches!(self.state.get(), BoundaryState::Faulted(_))
    }

    /// Put the boundary into the faulted state directly.
    ///
    /// Used for caller-supplied error phases: routing them through the same
    /// fallback path keeps all failure presentation in one place.
    pub fn fault(&self, error: TableError) {
        error!("table subtree faulted: {error}");
        self.state.set(BoundaryState::Faulted(error));
    }

    /// Clear the captured error so the next render re-mounts the subtree.
    ///
    /// A subtree that keeps panicking will simply re-enter the fallback.
    pub fn retry(&self) {
        self.state.set(BoundaryState::Healthy);
    }

    /// Run a render closure under supervision.
    ///
    /// If the boundary is already faulted, the closure is not run and the
    /// held fallback is returned. If the closure panics, the panic is
    /// captured, the boundary faults, and the fallback is returned.
    pub fn supervise<V>(&self, render: impl FnOnce() -> V) -> Supervised<V> {
        if let BoundaryState::Faulted(error) = self.state.get() {
            return Supervised::Fallback(FallbackView::from_error(error));
        }

        match catch_unwind(AssertUnwindSafe(render)) {
            Ok(view) => Supervised::Rendered(view),
            Err(panic) => {
                let error = TableError::RenderPanic {
                    message: extract_panic_message(&panic),
                };
                self.fault(error.clone());
                Supervised::Fallback(FallbackView::from_error(error))
            }
        }
    }
}
