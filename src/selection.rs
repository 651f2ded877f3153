//! Selection state for table rows.
//!
//! Selection uses string IDs for stability across row mutations: rows can be
//! re-sorted, filtered, or replaced without invalidating the selected set,
//! as long as the IDs survive.

use std::collections::HashSet;

/// ID-based selection state.
///
/// Mutating operations report the changed IDs so owners can forward exact
/// deltas through their own change notifications.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }

    /// Insert an ID. Returns true if it was newly selected.
    pub fn insert(&mut self, id: &str) -> bool {
        self.selected.insert(id.to_string())
    }

    /// Toggle selection of an ID.
    /// Returns (added, removed) IDs.
    pub fn toggle(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        if self.selected.remove(id) {
            (vec![], vec![id.to_string()])
        } else {
            self.selected.insert(id.to_string());
            (vec![id.to_string()], vec![])
        }
    }

    /// Select all IDs from the provided list.
    /// Returns the IDs that were newly selected.
    pub fn select_all(&mut self, all_ids: &[String]) -> Vec<String> {
        let mut added = Vec::new();
        for id in all_ids {
            if self.selected.insert(id.clone()) {
                added.push(id.clone());
            }
        }
        added
    }

    /// Drop every selected ID not present in `live_ids`.
    ///
    /// Used when the row collection is replaced wholesale: entries
    /// referencing rows that no longer exist are pruned eagerly.
    /// Returns the IDs that were dropped.
    pub fn retain(&mut self, live_ids: &HashSet<String>) -> Vec<String> {
        let stale: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !live_ids.contains(*id))
            .cloned()
            .collect();
        for id in &stale {
            self.selected.remove(id);
        }
        stale
    }

    /// Replace the whole selected set.
    pub fn replace(&mut self, ids: Vec<String>) {
        self.selected = ids.into_iter().collect();
    }
}
