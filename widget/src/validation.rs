//! Text validation for the add and edit inputs.
//!
//! Lengths are counted in chars after trimming surrounding whitespace.

use serde::{Deserialize, Serialize};

/// Default minimum length of a todo's text
pub const MIN_TEXT_LEN: usize = 3;

/// Default maximum length of a todo's text
pub const MAX_TEXT_LEN: usize = 32;

/// Inclusive length bounds for todo text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBounds {
    /// Shortest accepted text
    pub min: usize,
    /// Longest accepted text
    pub max: usize,
}

impl Default for TextBounds {
    fn default() -> Self {
        Self {
            min: MIN_TEXT_LEN,
            max: MAX_TEXT_LEN,
        }
    }
}

impl TextBounds {
    /// Creates bounds accepting `min..=max` chars
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Classifies `text`
    ///
    /// `touched` is whether the user has interacted with the field. An
    /// untouched empty field is too short but never `Required`.
    #[must_use]
    pub fn validate(&self, text: &str, touched: bool) -> Validation {
        let len = text.trim().chars().count();
        if len == 0 && touched {
            Validation::Required
        } else if len < self.min {
            Validation::TooShort
        } else if len > self.max {
            Validation::TooLong
        } else {
            Validation::Valid
        }
    }

    /// Returns true when `text` would be accepted by the list
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        self.validate(text, false).is_valid()
    }
}

/// Outcome of validating an input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Within bounds
    Valid,
    /// Shorter than the minimum
    TooShort,
    /// Longer than the maximum
    TooLong,
    /// Empty after the user touched the field
    Required,
}

impl Validation {
    /// Returns true for [`Validation::Valid`]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Inline error text, or `None` when valid
    #[must_use]
    pub fn message(self, bounds: &TextBounds) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::TooShort => Some(format!("Must be at least {} characters", bounds.min)),
            Self::TooLong => Some(format!("Must be no more than {} characters", bounds.max)),
            Self::Required => Some("This field is required".to_string()),
        }
    }
}

/// Validates `text` against the default bounds
#[must_use]
pub fn validate(text: &str, touched: bool) -> Validation {
    TextBounds::default().validate(text, touched)
}
