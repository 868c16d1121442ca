//! Domain types for the todo widget.
//!
//! The state is plain owned data split by concern: the list itself, the add
//! form draft, the inline edit, the in-flight tracker and the visible toasts.
//! Every input the widget reacts to, user intent or timer completion, is a
//! [`TodoAction`].

use crate::edit::{EditState, TextField};
use crate::list::TodoList;
use crate::toast::ToastQueue;
use crate::tracker::ActionTracker;
use serde::{Deserialize, Serialize};

/// Unique identifier for a todo item
///
/// Derived from the creation timestamp in milliseconds. Never reused within
/// one list, even after the item is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a `TodoId` from a raw millisecond value
    #[must_use]
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// The next id after this one, or `None` at `i64::MAX`
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, immutable once assigned
    pub id: TodoId,
    /// Trimmed text within the configured bounds
    pub text: String,
}

impl Todo {
    /// Creates a new todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self { id, text }
    }
}

/// Identifier of a visible toast
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a `ToastId` from a raw counter value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a toast
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// Positive confirmation
    Success,
    /// Destructive or failed outcome
    Error,
}

/// A transient notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Identifier used by the dismiss timer
    pub id: ToastId,
    /// Severity
    pub level: ToastLevel,
    /// Text shown to the user
    pub message: String,
}

/// State of the todo widget
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in insertion order
    pub todos: TodoList,
    /// Add form input
    pub draft: TextField,
    /// Inline edit of at most one row
    pub edit: EditState,
    /// Actions waiting for their simulated latency to elapse
    pub tracker: ActionTracker,
    /// Visible notifications, oldest first
    pub toasts: ToastQueue,
}

impl TodoState {
    /// Creates a new empty widget state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Texts of all todos in display order
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.todos.iter().map(|todo| todo.text.as_str()).collect()
    }
}

/// Actions the todo widget reacts to
///
/// User intents come from the rendered controls. Commit actions are only
/// ever produced by the reducer's own delay effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Add form ==========
    /// The add input changed
    DraftChanged {
        /// Full input value
        text: String,
    },

    /// The add button was pressed
    SubmitAdd,

    // ========== Inline edit ==========
    /// Enter edit mode on a row, discarding any other edit
    StartEditing {
        /// Row to edit
        id: TodoId,
    },

    /// The edit input changed
    EditChanged {
        /// Full input value
        text: String,
    },

    /// The update button was pressed
    SaveEditing,

    /// Leave edit mode without saving
    CancelEditing,

    // ========== Delete ==========
    /// The delete button was pressed
    Delete {
        /// Row to delete
        id: TodoId,
    },

    // ========== Commits ==========
    /// Simulated latency for an add elapsed
    AddCommitted {
        /// Trimmed text captured at submit time
        text: String,
    },

    /// Simulated latency for an update elapsed
    UpdateCommitted {
        /// Row being updated
        id: TodoId,
        /// Trimmed text captured at submit time
        text: String,
    },

    /// Simulated latency for a delete elapsed
    DeleteCommitted {
        /// Row being deleted
        id: TodoId,
    },

    /// A toast's display interval elapsed
    ToastExpired {
        /// Toast to dismiss
        id: ToastId,
    },

    // ========== Lifecycle ==========
    /// The widget is going away: cancel every timer and pending action
    Teardown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_orders_and_advances() {
        let id = TodoId::new(1_000);
        assert_eq!(id.next(), Some(TodoId::new(1_001)));
        assert!(id.next().is_some_and(|next| id < next));
        assert_eq!(id.to_string(), "1000");
        assert_eq!(TodoId::new(i64::MAX).next(), None);
    }

    #[test]
    fn action_serializes_with_variant_tag() {
        let action = TodoAction::Delete { id: TodoId::new(7) };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"Delete":{"id":7}}"#);
    }

    #[test]
    fn toast_level_is_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_string(&ToastLevel::Error).unwrap(), r#""error""#);
    }

    #[test]
    fn empty_state() {
        let state = TodoState::new();
        assert_eq!(state.count(), 0);
        assert!(state.texts().is_empty());
        assert!(state.tracker.is_idle());
    }
}
