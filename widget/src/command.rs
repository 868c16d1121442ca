//! Line commands for the console host.
//!
//! Each command stands for one interaction with the rendered widget. Rows are
//! addressed by their 1-based display index, which is resolved against the
//! current state when the command becomes actions.

use crate::error::WidgetError;
use crate::types::{TodoAction, TodoId, TodoState};

/// Help text listing every command
pub const HELP: &str = "\
commands:
  add [text]     submit the add form (typing <text> first if given)
  type <text>    type into the add form
  edit <n>       edit row n
  change <text>  type into the edit field
  save           update the row being edited
  cancel         leave edit mode
  delete <n>     delete row n
  show           render the widget
  json           render the widget as JSON
  metrics        print runtime metrics
  help           show this help
  quit           exit";

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the add form, optionally typing first
    Add(Option<String>),
    /// Type into the add form
    Type(String),
    /// Edit a row by display index
    Edit(usize),
    /// Type into the edit field
    Change(String),
    /// Save the edit
    Save,
    /// Leave edit mode
    Cancel,
    /// Delete a row by display index
    Delete(usize),
    /// Render as text
    Show,
    /// Render as JSON
    Json,
    /// Print metrics
    Metrics,
    /// Print help
    Help,
    /// Exit
    Quit,
}

impl Command {
    /// Parses one input line
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownCommand`] for an unknown verb,
    /// [`WidgetError::MissingArgument`] when a required argument is absent and
    /// [`WidgetError::InvalidRow`] when a row index is not a positive number.
    pub fn parse(line: &str) -> Result<Self, WidgetError> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb {
            "add" => Ok(Self::Add((!rest.is_empty()).then(|| rest.to_string()))),
            "type" => Ok(Self::Type(rest.to_string())),
            "edit" => parse_row("edit", rest).map(Self::Edit),
            "change" => Ok(Self::Change(rest.to_string())),
            "save" | "update" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "delete" | "rm" => parse_row("delete", rest).map(Self::Delete),
            "show" | "" => Ok(Self::Show),
            "json" => Ok(Self::Json),
            "metrics" => Ok(Self::Metrics),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(WidgetError::UnknownCommand(other.to_string())),
        }
    }

    /// Actions this command sends to the store
    ///
    /// Commands that only affect the console yield no actions.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidRow`] when a row index is past the list.
    pub fn actions(&self, state: &TodoState) -> Result<Vec<TodoAction>, WidgetError> {
        let actions = match self {
            Self::Add(None) => vec![TodoAction::SubmitAdd],
            Self::Add(Some(text)) => vec![
                TodoAction::DraftChanged { text: text.clone() },
                TodoAction::SubmitAdd,
            ],
            Self::Type(text) => vec![TodoAction::DraftChanged { text: text.clone() }],
            Self::Edit(index) => vec![TodoAction::StartEditing {
                id: row_id(state, *index)?,
            }],
            Self::Change(text) => vec![TodoAction::EditChanged { text: text.clone() }],
            Self::Save => vec![TodoAction::SaveEditing],
            Self::Cancel => vec![TodoAction::CancelEditing],
            Self::Delete(index) => vec![TodoAction::Delete {
                id: row_id(state, *index)?,
            }],
            Self::Show | Self::Json | Self::Metrics | Self::Help | Self::Quit => Vec::new(),
        };
        Ok(actions)
    }
}

fn parse_row(verb: &'static str, arg: &str) -> Result<usize, WidgetError> {
    if arg.is_empty() {
        return Err(WidgetError::MissingArgument(verb));
    }
    match arg.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(WidgetError::InvalidRow(arg.to_string())),
    }
}

fn row_id(state: &TodoState, index: usize) -> Result<TodoId, WidgetError> {
    index
        .checked_sub(1)
        .and_then(|i| state.todos.at(i))
        .map(|todo| todo.id)
        .ok_or_else(|| WidgetError::InvalidRow(index.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::TextBounds;

    #[test]
    fn parse_verbs() {
        assert_eq!(Command::parse("add"), Ok(Command::Add(None)));
        assert_eq!(
            Command::parse("  add   Buy milk "),
            Ok(Command::Add(Some("Buy milk".to_string())))
        );
        assert_eq!(Command::parse("type ab"), Ok(Command::Type("ab".to_string())));
        assert_eq!(Command::parse("edit 2"), Ok(Command::Edit(2)));
        assert_eq!(Command::parse("save"), Ok(Command::Save));
        assert_eq!(Command::parse("rm 1"), Ok(Command::Delete(1)));
        assert_eq!(Command::parse(""), Ok(Command::Show));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Command::parse("frobnicate"),
            Err(WidgetError::UnknownCommand("frobnicate".to_string()))
        );
        assert_eq!(
            Command::parse("delete"),
            Err(WidgetError::MissingArgument("delete"))
        );
        assert_eq!(
            Command::parse("edit zero"),
            Err(WidgetError::InvalidRow("zero".to_string()))
        );
        assert_eq!(
            Command::parse("edit 0"),
            Err(WidgetError::InvalidRow("0".to_string()))
        );
    }

    #[test]
    fn rows_resolve_against_state() {
        let mut state = TodoState::new();
        state.todos.add(TodoId::new(10), "one one", &TextBounds::default());
        state.todos.add(TodoId::new(20), "two two", &TextBounds::default());

        assert_eq!(
            Command::Delete(2).actions(&state),
            Ok(vec![TodoAction::Delete { id: TodoId::new(20) }])
        );
        assert_eq!(
            Command::Edit(3).actions(&state),
            Err(WidgetError::InvalidRow("3".to_string()))
        );
    }

    #[test]
    fn add_with_text_types_then_submits() {
        let actions = Command::Add(Some("Buy milk".to_string()))
            .actions(&TodoState::new())
            .unwrap();
        assert_eq!(
            actions,
            vec![
                TodoAction::DraftChanged {
                    text: "Buy milk".to_string()
                },
                TodoAction::SubmitAdd,
            ]
        );
        assert!(Command::Show.actions(&TodoState::new()).unwrap().is_empty());
    }
}
