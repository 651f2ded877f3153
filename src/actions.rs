//! Bulk actions over the current selection.
//!
//! Actions are stateless descriptors; eligibility is recomputed on every
//! selection change. Actions carrying a confirmation message go through a
//! blocking confirmation gate - at most one confirmation can be pending at
//! a time.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::state::State;
use crate::table::TableRow;

/// Eligible actions up to this count render inline; more collapse into a
/// single overflow menu. A UX density rule, not a performance one.
pub const INLINE_ACTION_LIMIT: usize = 2;

/// Semantic tag for how an action should be presented. The engine attaches
/// no styling to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    #[default]
    Default,
    Primary,
    Destructive,
}

/// How the eligible actions should be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPresentation {
    /// Individual buttons.
    Inline,
    /// One collapsed overflow menu.
    Overflow,
}

type ActionFn<T> = Arc<dyn Fn(&[T]) + Send + Sync>;
type DisabledFn<T> = Arc<dyn Fn(&[T]) -> bool + Send + Sync>;

/// A bulk action descriptor.
///
/// # Example
///
/// ```ignore
/// let delete = TableAction::new("Delete", |rows: &[Merchant]| remove(rows))
///     .variant(ActionVariant::Destructive)
///     .requires_selection()
///     .confirm("Delete the selected merchants?");
/// ```
#[derive(Clone)]
pub struct TableAction<T: TableRow> {
    pub label: String,
    pub variant: ActionVariant,
    /// When true the action is ineligible while nothing is selected.
    pub requires_selection: bool,
    /// When present, invocation opens a confirmation gate instead of
    /// executing directly.
    pub confirmation_message: Option<String>,
    on_click: ActionFn<T>,
    disabled_when: Option<DisabledFn<T>>,
}

impl<T: TableRow> TableAction<T> {
    /// Create an action with a label and click handler.
    pub fn new(label: impl Into<String>, on_click: impl Fn(&[T]) + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            variant: ActionVariant::Default,
            requires_selection: false,
            confirmation_message: None,
            on_click: Arc::new(on_click),
            disabled_when: None,
        }
    }

    /// Set the semantic variant.
    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Require a non-empty selection.
    pub fn requires_selection(mut self) -> Self {
        self.requires_selection = true;
        self
    }

    /// Gate execution behind a confirmation prompt.
    pub fn confirm(mut self, message: impl Into<String>) -> Self {
        self.confirmation_message = Some(message.into());
        self
    }

    /// Disable the action while the predicate holds over the selection.
    pub fn disabled_when(mut self, f: impl Fn(&[T]) -> bool + Send + Sync + 'static) -> Self {
        self.disabled_when = Some(Arc::new(f));
        self
    }

    fn eligible(&self, selected: &[T]) -> bool {
        if self.requires_selection && selected.is_empty() {
            return false;
        }
        match &self.disabled_when {
            Some(f) => !f(selected),
            None => true,
        }
    }
}

impl<T: TableRow> fmt::Debug for TableAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableAction")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("requires_selection", &self.requires_selection)
            .field("confirmation_message", &self.confirmation_message)
            .finish_non_exhaustive()
    }
}

/// Outcome of invoking an action through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeOutcome {
    /// The handler ran.
    Executed,
    /// A confirmation is now pending; nothing ran yet.
    AwaitingConfirmation,
    /// The action was not eligible for the current selection.
    Ineligible,
    /// Another confirmation is already pending.
    Blocked,
}

/// A pending confirmation held by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    /// Index of the action awaiting confirmation.
    pub action_index: usize,
    pub message: String,
}

/// Decides which bulk actions are currently eligible and runs them,
/// directly or through the confirmation gate.
pub struct ActionDispatcher<T: TableRow> {
    actions: Vec<TableAction<T>>,
    pending: State<Option<PendingConfirmation>>,
}

impl<T: TableRow> ActionDispatcher<T> {
    /// Create a dispatcher over an action list.
    pub fn new(actions: Vec<TableAction<T>>) -> Self {
        Self {
            actions,
            pending: State::new(None),
        }
    }

    /// The full action list.
    pub fn actions(&self) -> &[TableAction<T>] {
        &self.actions
    }

    /// Whether any actions are configured at all.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Indices of the actions eligible for the current selection.
    pub fn eligible(&self, selected: &[T]) -> Vec<usize> {
        self.actions
            .iter()
            .enumerate()
            .filter(|(_, action)| action.eligible(selected))
            .map(|(i, _)| i)
            .collect()
    }

    /// Layout rule for a given eligible count.
    pub fn presentation(eligible_count: usize) -> ActionPresentation {
        if eligible_count <= INLINE_ACTION_LIMIT {
            ActionPresentation::Inline
        } else {
            ActionPresentation::Overflow
        }
    }

    /// Invoke an action by index for the current selection.
    ///
    /// Actions without a confirmation message execute immediately; actions
    /// with one park in the confirmation gate until [`confirm`](Self::confirm)
    /// or [`cancel`](Self::cancel).
    pub fn invoke(&self, index: usize, selected: &[T]) -> InvokeOutcome {
        if self.pending.get().is_some() {
            warn!("action invoked while a confirmation is pending");
            return InvokeOutcome::Blocked;
        }
        let Some(action) = self.actions.get(index) else {
            return InvokeOutcome::Ineligible;
        };
        if !action.eligible(selected) {
            return InvokeOutcome::Ineligible;
        }

        match &action.confirmation_message {
            None => {
                debug!("executing action '{}'", action.label);
                (action.on_click)(selected);
                InvokeOutcome::Executed
            }
            Some(message) => {
                debug!("action '{}' awaiting confirmation", action.label);
                self.pending.set(Some(PendingConfirmation {
                    action_index: index,
                    message: message.clone(),
                }));
                InvokeOutcome::AwaitingConfirmation
            }
        }
    }

    /// The confirmation currently pending, if any.
    pub fn pending_confirmation(&self) -> Option<PendingConfirmation> {
        self.pending.get()
    }

    /// Affirm the pending confirmation: runs the parked action's handler
    /// against the given selection, then clears the gate. Returns true if a
    /// handler ran.
    pub fn confirm(&self, selected: &[T]) -> bool {
        let Some(pending) = self.pending.get() else {
            return false;
        };
        self.pending.set(None);
        if let Some(action) = self.actions.get(pending.action_index) {
            debug!("confirmed action '{}'", action.label);
            (action.on_click)(selected);
            true
        } else {
            false
        }
    }

    /// Dismiss the pending confirmation without executing anything.
    pub fn cancel(&self) {
        if self.pending.get().is_some() {
            debug!("confirmation cancelled");
            self.pending.set(None);
        }
    }
}

impl<T: TableRow> fmt::Debug for ActionDispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("actions", &self.actions)
            .field("pending", &self.pending.get())
            .finish()
    }
}
