//! In-flight action tracking.
//!
//! Each target has its own state: the add form has one slot, and every row is
//! independently idle, updating or deleting. A target that is busy rejects a
//! second trigger until its commit arrives.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of mutation pending on a row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    /// Text replacement
    Update,
    /// Removal
    Delete,
}

/// Single-slot view of one in-flight action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// An add is waiting to commit
    Adding,
    /// `id` is waiting for its new text
    Updating(TodoId),
    /// `id` is waiting to be removed
    Deleting(TodoId),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Pending<T> {
    value: T,
    seq: u64,
}

/// Per-target in-flight state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTracker {
    adding: Option<Pending<String>>,
    rows: BTreeMap<TodoId, Pending<RowAction>>,
    next_seq: u64,
}

impl ActionTracker {
    fn stamp(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Marks an add of `text` in flight; false if one already is
    pub fn begin_add(&mut self, text: impl Into<String>) -> bool {
        if self.adding.is_some() {
            return false;
        }
        let seq = self.stamp();
        self.adding = Some(Pending {
            value: text.into(),
            seq,
        });
        true
    }

    /// Clears the add slot if it holds `text`
    pub fn finish_add(&mut self, text: &str) -> bool {
        if self.adding.as_ref().is_some_and(|p| p.value == text) {
            self.adding = None;
            true
        } else {
            false
        }
    }

    /// Marks `action` in flight on `id`; false if the row is already busy
    pub fn begin_row(&mut self, id: TodoId, action: RowAction) -> bool {
        if self.rows.contains_key(&id) {
            return false;
        }
        let seq = self.stamp();
        self.rows.insert(id, Pending { value: action, seq });
        true
    }

    /// Returns the row to idle if it holds `action`
    pub fn finish_row(&mut self, id: TodoId, action: RowAction) -> bool {
        if self.row(id) == Some(action) {
            self.rows.remove(&id);
            true
        } else {
            false
        }
    }

    /// Forgets everything in flight, returning the rows that were busy
    pub fn clear(&mut self) -> Vec<TodoId> {
        self.adding = None;
        std::mem::take(&mut self.rows).into_keys().collect()
    }

    /// Returns true when an add is in flight
    #[must_use]
    pub const fn is_adding(&self) -> bool {
        self.adding.is_some()
    }

    /// Pending action on `id`
    #[must_use]
    pub fn row(&self, id: TodoId) -> Option<RowAction> {
        self.rows.get(&id).map(|p| p.value)
    }

    /// Returns true when `id` has an action in flight
    #[must_use]
    pub fn is_busy(&self, id: TodoId) -> bool {
        self.rows.contains_key(&id)
    }

    /// Returns true when nothing is in flight
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.adding.is_none() && self.rows.is_empty()
    }

    /// The most recently started action still in flight
    #[must_use]
    pub fn current(&self) -> Option<PendingAction> {
        let add = self.adding.as_ref().map(|p| (p.seq, PendingAction::Adding));
        let rows = self.rows.iter().map(|(id, p)| {
            let action = match p.value {
                RowAction::Update => PendingAction::Updating(*id),
                RowAction::Delete => PendingAction::Deleting(*id),
            };
            (p.seq, action)
        });
        add.into_iter()
            .chain(rows)
            .max_by_key(|(seq, _)| *seq)
            .map(|(_, action)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_slot_rejects_second_add() {
        let mut tracker = ActionTracker::default();
        assert!(tracker.begin_add("Buy milk"));
        assert!(!tracker.begin_add("Walk dog"));
        assert!(tracker.is_adding());
        assert!(!tracker.finish_add("Walk dog"));
        assert!(tracker.finish_add("Buy milk"));
        assert!(tracker.is_idle());
    }

    #[test]
    fn rows_are_independent() {
        let mut tracker = ActionTracker::default();
        let a = TodoId::new(1);
        let b = TodoId::new(2);

        assert!(tracker.begin_row(a, RowAction::Delete));
        assert!(tracker.begin_row(b, RowAction::Update));
        assert!(!tracker.begin_row(a, RowAction::Update));

        assert!(tracker.is_busy(a));
        assert_eq!(tracker.row(b), Some(RowAction::Update));
        assert!(!tracker.is_busy(TodoId::new(3)));
    }

    #[test]
    fn finish_row_checks_kind() {
        let mut tracker = ActionTracker::default();
        let id = TodoId::new(1);
        tracker.begin_row(id, RowAction::Delete);
        assert!(!tracker.finish_row(id, RowAction::Update));
        assert!(tracker.finish_row(id, RowAction::Delete));
        assert!(!tracker.finish_row(id, RowAction::Delete));
    }

    #[test]
    fn current_is_most_recent() {
        let mut tracker = ActionTracker::default();
        assert_eq!(tracker.current(), None);

        tracker.begin_row(TodoId::new(9), RowAction::Update);
        tracker.begin_add("later add");
        assert_eq!(tracker.current(), Some(PendingAction::Adding));

        tracker.begin_row(TodoId::new(1), RowAction::Delete);
        assert_eq!(tracker.current(), Some(PendingAction::Deleting(TodoId::new(1))));

        tracker.finish_row(TodoId::new(1), RowAction::Delete);
        tracker.finish_add("later add");
        assert_eq!(tracker.current(), Some(PendingAction::Updating(TodoId::new(9))));
    }

    #[test]
    fn clear_returns_busy_rows() {
        let mut tracker = ActionTracker::default();
        tracker.begin_add("text");
        tracker.begin_row(TodoId::new(2), RowAction::Delete);
        tracker.begin_row(TodoId::new(1), RowAction::Update);
        assert_eq!(tracker.clear(), vec![TodoId::new(1), TodoId::new(2)]);
        assert!(tracker.is_idle());
    }
}
