//! Input fields: the add form draft and the single inline edit.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};

/// A text input that remembers whether the user has typed into it
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextField {
    text: String,
    touched: bool,
}

impl TextField {
    /// An untouched field holding `text`
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            touched: false,
        }
    }

    /// Replaces the value and marks the field touched
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touched = true;
    }

    /// Empties the field and forgets it was touched
    pub fn clear(&mut self) {
        self.text.clear();
        self.touched = false;
    }

    /// Current value
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the user has typed into the field
    #[must_use]
    pub const fn touched(&self) -> bool {
        self.touched
    }
}

/// Inline edit state; at most one row is edited at a time
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    editing: Option<TodoId>,
    field: TextField,
}

impl EditState {
    /// Enters edit mode on `id` seeded with its current text
    ///
    /// Returns the row whose edit was discarded, if any.
    pub fn begin(&mut self, id: TodoId, text: &str) -> Option<TodoId> {
        let previous = self.editing.replace(id).filter(|prev| *prev != id);
        self.field = TextField::with_text(text);
        previous
    }

    /// Updates the edit input; ignored when nothing is being edited
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if self.editing.is_none() {
            return false;
        }
        self.field.set(text);
        true
    }

    /// Leaves edit mode
    pub fn clear(&mut self) {
        self.editing = None;
        self.field.clear();
    }

    /// Leaves edit mode only if `id` is the row being edited
    pub fn clear_if(&mut self, id: TodoId) -> bool {
        if self.is_editing(id) {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Row in edit mode
    #[must_use]
    pub const fn editing_id(&self) -> Option<TodoId> {
        self.editing
    }

    /// Returns true when `id` is in edit mode
    #[must_use]
    pub fn is_editing(&self, id: TodoId) -> bool {
        self.editing == Some(id)
    }

    /// The edit input
    #[must_use]
    pub const fn field(&self) -> &TextField {
        &self.field
    }
}
