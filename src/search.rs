//! Debounced search control.
//!
//! Bridges rapid input events to the store's `set_global_filter` without
//! flooding downstream recomputation. Each keystroke schedules a delayed
//! commit that supersedes any previously scheduled one (last-write-wins,
//! not queued). The pending commit is a tokio task whose handle is aborted
//! on supersession and on drop, so a late callback can never fire into a
//! disposed store.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;

use crate::state::State;
use crate::table::DEFAULT_SEARCH_DEBOUNCE;

type CommitFn = Arc<dyn Fn(String) + Send + Sync>;

/// A debounced text-input adapter.
///
/// Holds a local shadow value so the caller can echo keystrokes
/// immediately while the committed value trails by the debounce delay.
///
/// `input()` must be called from within a tokio runtime; the delayed
/// commit is a spawned timer task.
pub struct SearchControl {
    shadow: State<String>,
    delay: Duration,
    commit: CommitFn,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchControl {
    /// Create a control committing through the given callback with the
    /// default delay.
    pub fn new(commit: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self {
            shadow: State::new(String::new()),
            delay: DEFAULT_SEARCH_DEBOUNCE,
            commit: Arc::new(commit),
            pending: Mutex::new(None),
        }
    }

    /// Override the debounce delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The current shadow value (what the input field should display).
    pub fn value(&self) -> String {
        self.shadow.get()
    }

    /// The configured debounce delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a keystroke: update the shadow immediately and schedule a
    /// delayed commit, superseding any pending one.
    pub fn input(&self, value: impl Into<String>) {
        let value = value.into();
        self.shadow.set(value.clone());

        let commit = Arc::clone(&self.commit);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("search commit: {value:?}");
            commit(value);
        });
        self.replace_pending(Some(handle));
    }

    /// Clear the search: commits an empty value immediately, bypassing the
    /// delay.
    pub fn clear(&self) {
        self.replace_pending(None);
        self.shadow.set(String::new());
        (self.commit)(String::new());
    }

    /// Resynchronize with an externally changed value (state reset
    /// elsewhere). Overrides any in-flight pending commit without
    /// re-committing.
    pub fn sync(&self, external: impl Into<String>) {
        self.replace_pending(None);
        self.shadow.set(external.into());
    }

    fn replace_pending(&self, new: Option<JoinHandle<()>>) {
        if let Ok(mut guard) = self.pending.lock() {
            if let Some(old) = guard.take() {
                old.abort();
            }
            *guard = new;
        }
    }
}

impl Drop for SearchControl {
    fn drop(&mut self) {
        // The timer task must not outlive the control.
        self.replace_pending(None);
    }
}

impl fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchControl")
            .field("value", &self.shadow.get())
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
