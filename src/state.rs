//! Shared mutable cell for small pieces of component state.

use std::sync::{Arc, RwLock};

/// Thread-safe state cell.
///
/// Cheap to clone (handles share the value) and safe to hand to background
/// tasks, which is what the search control's pending commit and the
/// boundary's supervision state need. Heavier aggregate state with change
/// reporting lives in [`TableStore`](crate::table::TableStore); this cell
/// is for the single-value cases around it.
///
/// # Example
///
/// ```
/// use tablekit::state::State;
///
/// let counter = State::new(0);
/// counter.update(|v| *v += 1);
/// assert_eq!(counter.get(), 1);
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> State<T> {
    /// Create a cell holding the given value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Replace the value.
    pub fn set(&self, value: T) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = value;
        }
    }

    /// Mutate the value in place.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard);
        }
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
