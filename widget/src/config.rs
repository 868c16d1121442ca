//! Widget configuration.
//!
//! Defaults match the behaviour users expect from the widget. Hosts may
//! override them in code with the `with_*` builders, or from environment
//! variables through [`WidgetConfig::from_env`].

use crate::error::WidgetError;
use crate::validation::TextBounds;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default simulated latency before a mutation commits
pub const DEFAULT_COMMIT_DELAY_MS: u64 = 1_000;
/// Default time a toast stays visible
pub const DEFAULT_TOAST_MS: u64 = 2_000;
/// Default number of toasts visible at once
pub const DEFAULT_MAX_TOASTS: usize = 5;

/// Tunables of the todo widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Heading shown above the list
    pub title: String,
    /// Simulated latency in milliseconds
    pub commit_delay_ms: u64,
    /// Toast display interval in milliseconds
    pub toast_ms: u64,
    /// Toasts visible at once; older ones are evicted
    pub max_toasts: usize,
    /// Accepted text length
    pub bounds: TextBounds,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: "Todo List".to_string(),
            commit_delay_ms: DEFAULT_COMMIT_DELAY_MS,
            toast_ms: DEFAULT_TOAST_MS,
            max_toasts: DEFAULT_MAX_TOASTS,
            bounds: TextBounds::default(),
        }
    }
}

impl WidgetConfig {
    /// Load overrides from environment variables
    ///
    /// Reads `TODO_COMMIT_DELAY_MS`, `TODO_TOAST_MS` and `TODO_MAX_TOASTS`.
    /// Missing or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load overrides through `lookup`, which maps a variable name to its value
    ///
    /// [`WidgetConfig::from_env`] passes the process environment.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            commit_delay_ms: parse_var(&lookup, "TODO_COMMIT_DELAY_MS")
                .unwrap_or(defaults.commit_delay_ms),
            toast_ms: parse_var(&lookup, "TODO_TOAST_MS").unwrap_or(defaults.toast_ms),
            max_toasts: parse_var(&lookup, "TODO_MAX_TOASTS").unwrap_or(defaults.max_toasts),
            ..defaults
        }
    }

    /// Set the simulated latency
    #[must_use]
    pub fn with_commit_delay(mut self, delay: Duration) -> Self {
        self.commit_delay_ms = duration_millis(delay);
        self
    }

    /// Set the toast display interval
    #[must_use]
    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_ms = duration_millis(duration);
        self
    }

    /// Set how many toasts may be visible at once
    #[must_use]
    pub const fn with_max_toasts(mut self, max_toasts: usize) -> Self {
        self.max_toasts = max_toasts;
        self
    }

    /// Set the accepted text length
    #[must_use]
    pub const fn with_bounds(mut self, bounds: TextBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Simulated latency before a mutation commits
    #[must_use]
    pub const fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    /// Toast display interval
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`] when the bounds are empty or
    /// inverted, or when no toast could ever be shown.
    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.bounds.min == 0 {
            return Err(WidgetError::InvalidConfig(
                "bounds.min must be at least 1".to_string(),
            ));
        }
        if self.bounds.min > self.bounds.max {
            return Err(WidgetError::InvalidConfig(format!(
                "bounds.min ({}) exceeds bounds.max ({})",
                self.bounds.min, self.bounds.max
            )));
        }
        if self.max_toasts == 0 {
            return Err(WidgetError::InvalidConfig(
                "max_toasts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable config value");
            None
        },
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.commit_delay(), Duration::from_secs(1));
        assert_eq!(config.toast_duration(), Duration::from_secs(2));
        assert_eq!(config.max_toasts, 5);
        assert_eq!(config.bounds, TextBounds::new(3, 32));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders() {
        let config = WidgetConfig::default()
            .with_commit_delay(Duration::from_millis(10))
            .with_toast_duration(Duration::from_millis(20))
            .with_max_toasts(2)
            .with_bounds(TextBounds::new(1, 8));
        assert_eq!(config.commit_delay_ms, 10);
        assert_eq!(config.toast_ms, 20);
        assert_eq!(config.max_toasts, 2);
        assert_eq!(config.bounds.max, 8);
    }

    #[test]
    fn lookup_overrides_and_falls_back() {
        let vars = HashMap::from([
            ("TODO_COMMIT_DELAY_MS", "250"),
            ("TODO_TOAST_MS", "soon"),
            ("TODO_MAX_TOASTS", " 3 "),
        ]);
        let config = WidgetConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.commit_delay(), Duration::from_millis(250));
        assert_eq!(config.toast_ms, DEFAULT_TOAST_MS);
        assert_eq!(config.max_toasts, 3);
        assert_eq!(config.title, "Todo List");
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        assert_eq!(WidgetConfig::from_lookup(|_| None), WidgetConfig::default());
    }

    #[test]
    fn from_env_without_overrides_is_valid() {
        // The test process does not set these variables
        let config = WidgetConfig::from_env();
        assert!(config.validate().is_ok());
        assert_eq!(config.bounds, TextBounds::default());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let inverted = WidgetConfig::default().with_bounds(TextBounds::new(10, 3));
        assert!(matches!(inverted.validate(), Err(WidgetError::InvalidConfig(_))));

        let zero_min = WidgetConfig::default().with_bounds(TextBounds::new(0, 3));
        assert!(zero_min.validate().is_err());

        let no_toasts = WidgetConfig::default().with_max_toasts(0);
        assert!(no_toasts.validate().is_err());
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let config: WidgetConfig = serde_json::from_str(r#"{"commit_delay_ms": 50}"#).unwrap();
        assert_eq!(config.commit_delay_ms, 50);
        assert_eq!(config.toast_ms, DEFAULT_TOAST_MS);
        assert_eq!(config.title, "Todo List");
    }
}
