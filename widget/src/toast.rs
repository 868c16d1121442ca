//! Visible toast notifications.

use crate::types::{Toast, ToastId, ToastLevel};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Bounded queue of visible toasts, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastQueue {
    visible: VecDeque<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Shows a toast, evicting the oldest ones beyond `capacity`
    ///
    /// Returns the new toast's id and the ids of evicted toasts.
    pub fn push(
        &mut self,
        level: ToastLevel,
        message: impl Into<String>,
        capacity: usize,
    ) -> (ToastId, Vec<ToastId>) {
        let id = ToastId::new(self.next_id);
        self.next_id += 1;
        self.visible.push_back(Toast {
            id,
            level,
            message: message.into(),
        });

        let mut evicted = Vec::new();
        while self.visible.len() > capacity.max(1) {
            if let Some(oldest) = self.visible.pop_front() {
                evicted.push(oldest.id);
            }
        }
        (id, evicted)
    }

    /// Hides `id`; false if it was no longer visible
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.visible.len();
        self.visible.retain(|toast| toast.id != id);
        self.visible.len() != before
    }

    /// Hides every toast, returning their ids
    pub fn clear(&mut self) -> Vec<ToastId> {
        self.visible.drain(..).map(|toast| toast.id).collect()
    }

    /// Visible toasts, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.visible.iter()
    }

    /// Number of visible toasts
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Returns true when no toast is visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        let (a, evicted) = queue.push(ToastLevel::Success, "Task added!", 5);
        let (b, _) = queue.push(ToastLevel::Error, "Task deleted", 5);
        assert!(evicted.is_empty());
        assert!(a < b);
        let messages: Vec<_> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["Task added!", "Task deleted"]);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut queue = ToastQueue::default();
        let (first, _) = queue.push(ToastLevel::Success, "one", 2);
        queue.push(ToastLevel::Success, "two", 2);
        let (_, evicted) = queue.push(ToastLevel::Success, "three", 2);
        assert_eq!(evicted, vec![first]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn zero_capacity_still_shows_latest() {
        let mut queue = ToastQueue::default();
        let (id, _) = queue.push(ToastLevel::Success, "only", 0);
        assert_eq!(queue.iter().next().map(|t| t.id), Some(id));
    }

    #[test]
    fn dismiss_and_clear() {
        let mut queue = ToastQueue::default();
        let (a, _) = queue.push(ToastLevel::Success, "one", 5);
        let (b, _) = queue.push(ToastLevel::Success, "two", 5);
        assert!(queue.dismiss(a));
        assert!(!queue.dismiss(a));
        assert_eq!(queue.clear(), vec![b]);
        assert!(queue.is_empty());
    }
}
