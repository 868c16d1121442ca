//! Presentation: a serializable view model of the widget and a plain-text
//! rendering of it.
//!
//! [`WidgetView::build`] is a pure function of state and configuration. Hosts
//! either draw the tree themselves (it serializes with `serde`) or print
//! [`render_text`].

use crate::config::WidgetConfig;
use crate::edit::TextField;
use crate::tracker::RowAction;
use crate::types::{Todo, TodoId, TodoState, ToastLevel};
use crate::validation::{TextBounds, Validation};
use serde::Serialize;
use std::fmt;

/// Text drawn in place of a busy control's label
pub const SPINNER: &str = "...";

/// A clickable control
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    /// Label when idle
    pub label: &'static str,
    /// Whether pressing does nothing
    pub disabled: bool,
    /// Whether a spinner replaces the label
    pub busy: bool,
}

impl ButtonView {
    const fn new(label: &'static str, disabled: bool, busy: bool) -> Self {
        Self {
            label,
            disabled,
            busy,
        }
    }

    /// The label as drawn: the spinner while busy
    #[must_use]
    pub const fn shown_label(&self) -> &'static str {
        if self.busy { SPINNER } else { self.label }
    }
}

/// A text input with its inline error
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputView {
    /// Current value
    pub value: String,
    /// Validation message, shown once the field has been touched
    pub error: Option<String>,
}

impl InputView {
    fn from_field(field: &TextField, bounds: &TextBounds) -> Self {
        let error = if field.touched() {
            bounds.validate(field.text(), true).message(bounds)
        } else {
            None
        };
        Self {
            value: field.text().to_string(),
            error,
        }
    }
}

/// The add form
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Draft input
    pub input: InputView,
    /// Add button
    pub add: ButtonView,
}

/// Contents of a row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RowBody {
    /// Read-only text with edit and delete controls
    Display {
        /// Stored text
        text: String,
        /// Enters edit mode
        edit: ButtonView,
        /// Deletes the row
        delete: ButtonView,
    },
    /// Inline edit field with update and cancel controls
    Editing {
        /// Edit input
        input: InputView,
        /// Saves the edit
        update: ButtonView,
        /// Leaves edit mode
        cancel: ButtonView,
    },
}

/// One list row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// 1-based display index
    pub index: usize,
    /// Id of the todo shown
    pub id: TodoId,
    /// What the row shows
    pub body: RowBody,
}

/// A visible toast
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToastView {
    /// Severity
    pub level: ToastLevel,
    /// Text
    pub message: String,
}

/// The whole widget as a tree of plain values
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WidgetView {
    /// Heading
    pub title: String,
    /// Add form
    pub form: FormView,
    /// Rows in list order
    pub rows: Vec<RowView>,
    /// Toasts, oldest first
    pub toasts: Vec<ToastView>,
}

impl WidgetView {
    /// Builds the view of `state`
    #[must_use]
    pub fn build(state: &TodoState, config: &WidgetConfig) -> Self {
        let bounds = &config.bounds;
        let adding = state.tracker.is_adding();
        let draft_valid = bounds.validate(state.draft.text(), false).is_valid();

        let form = FormView {
            input: InputView::from_field(&state.draft, bounds),
            add: ButtonView::new("Add", !draft_valid || adding, adding),
        };

        let rows = (1..)
            .zip(state.todos.iter())
            .map(|(index, todo)| RowView {
                index,
                id: todo.id,
                body: row_body(state, todo, bounds),
            })
            .collect();

        let toasts = state
            .toasts
            .iter()
            .map(|toast| ToastView {
                level: toast.level,
                message: toast.message.clone(),
            })
            .collect();

        Self {
            title: config.title.clone(),
            form,
            rows,
            toasts,
        }
    }

    /// Rows currently showing a spinner
    #[must_use]
    pub fn busy_rows(&self) -> Vec<TodoId> {
        self.rows
            .iter()
            .filter(|row| match &row.body {
                RowBody::Display { edit, delete, .. } => edit.busy || delete.busy,
                RowBody::Editing { update, .. } => update.busy,
            })
            .map(|row| row.id)
            .collect()
    }

    /// Serializes the view for a host renderer
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn row_body(state: &TodoState, todo: &Todo, bounds: &TextBounds) -> RowBody {
    let pending = state.tracker.row(todo.id);
    let busy = pending.is_some();

    if state.edit.is_editing(todo.id) {
        let field = state.edit.field();
        let valid = bounds.validate(field.text(), false) == Validation::Valid;
        RowBody::Editing {
            input: InputView::from_field(field, bounds),
            update: ButtonView::new("Update", !valid || busy, busy),
            cancel: ButtonView::new("Cancel", false, false),
        }
    } else {
        RowBody::Display {
            text: todo.text.clone(),
            edit: ButtonView::new("Edit", busy, pending == Some(RowAction::Update)),
            delete: ButtonView::new("Delete", busy, pending == Some(RowAction::Delete)),
        }
    }
}

impl fmt::Display for ButtonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disabled {
            write!(f, "({})", self.shown_label())
        } else {
            write!(f, "[{}]", self.shown_label())
        }
    }
}

impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;

        writeln!(f, "> \"{}\" {}", self.form.input.value, self.form.add)?;
        if let Some(error) = &self.form.input.error {
            writeln!(f, "  ! {error}")?;
        }

        if self.rows.is_empty() {
            writeln!(f, "  (no todos)")?;
        }
        for row in &self.rows {
            match &row.body {
                RowBody::Display { text, edit, delete } => {
                    writeln!(f, "{:>3}. {text} {edit} {delete}", row.index)?;
                },
                RowBody::Editing {
                    input,
                    update,
                    cancel,
                } => {
                    writeln!(f, "{:>3}. \"{}\" {update} {cancel}", row.index, input.value)?;
                    if let Some(error) = &input.error {
                        writeln!(f, "       ! {error}")?;
                    }
                },
            }
        }

        for toast in &self.toasts {
            let tag = match toast.level {
                ToastLevel::Success => "ok",
                ToastLevel::Error => "!!",
            };
            writeln!(f, "  <{tag}> {}", toast.message)?;
        }
        Ok(())
    }
}

/// Draws the view as plain text lines
///
/// Enabled controls are drawn `[Label]`, disabled ones `(Label)`, and a busy
/// control shows the spinner instead of its label.
#[must_use]
pub fn render_text(view: &WidgetView) -> String {
    view.to_string()
}
