//! Widget errors.
//!
//! The reducer itself never fails: rejected triggers are silent no-ops. These
//! errors come from configuration and the console command surface.

use thiserror::Error;

/// Errors from configuring or driving the widget
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The console does not know the command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The command needs an argument that was not given
    #[error("Command `{0}` needs an argument")]
    MissingArgument(&'static str),

    /// The row reference is not a number or points past the list
    #[error("No such row: {0}")]
    InvalidRow(String),
}
