//! Prometheus metrics for the Store runtime.
//!
//! The Store records through the `metrics` facade unconditionally. Nothing is
//! collected until a recorder is installed, which hosts do through
//! [`MetricsRecorder::install`].
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut recorder = MetricsRecorder::new();
//! recorder.install()?;
//!
//! // ... drive a store ...
//!
//! if let Some(text) = recorder.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Metric name: actions processed by the store
pub const COMMANDS_TOTAL: &str = "store.commands.total";
/// Metric name: effects executed, labelled by `type`
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";
/// Metric name: in-flight effect tasks aborted by `Effect::Cancel`
pub const EFFECTS_CANCELLED: &str = "store.effects.cancelled";
/// Metric name: number of effects returned per reduce call
pub const EFFECTS_COUNT: &str = "store.effects.count";
/// Metric name: reducer wall time
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";
/// Metric name: actions rejected because the store is shutting down
pub const SHUTDOWN_REJECTED: &str = "store.shutdown.rejected_actions";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus recorder wrapper.
///
/// Installs a process-wide recorder and keeps its handle for rendering.
#[derive(Default)]
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl MetricsRecorder {
    /// Create a recorder that has not been installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Describe the store metrics and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g., in tests), this logs a
    /// warning and succeeds without a handle.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_01, 0.000_1, 0.001, 0.01, 0.1, 1.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                register_metrics();
                self.handle = Some(handle);
                tracing::debug!("Prometheus metrics recorder installed");
                Ok(())
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus text format.
    ///
    /// Returns `None` if the recorder hasn't been installed by this instance.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!(COMMANDS_TOTAL, "Total number of actions processed by the store");
    describe_counter!(EFFECTS_EXECUTED, "Total number of effects executed, by effect type");
    describe_counter!(EFFECTS_CANCELLED, "Total number of in-flight effect tasks cancelled");
    describe_counter!(
        SHUTDOWN_REJECTED,
        "Total number of actions rejected during shutdown"
    );
    describe_histogram!(EFFECTS_COUNT, "Number of effects returned per action");
    describe_histogram!(REDUCER_DURATION, "Time taken to run the reducer");
}

/// Record one reducer call.
pub fn record_reduce(duration: Duration, effect_count: usize) {
    counter!(COMMANDS_TOTAL).increment(1);
    histogram!(REDUCER_DURATION).record(duration.as_secs_f64());
    // Note: Precision loss acceptable for metrics (effect counts < 2^52)
    #[allow(clippy::cast_precision_loss)]
    histogram!(EFFECTS_COUNT).record(effect_count as f64);
}

/// Record execution of one effect of the given kind.
pub fn record_effect(kind: &'static str) {
    counter!(EFFECTS_EXECUTED, "type" => kind).increment(1);
}

/// Record tasks aborted by a cancellation.
pub fn record_cancelled(tasks: usize) {
    counter!(EFFECTS_CANCELLED).increment(tasks as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_starts_uninstalled() {
        let recorder = MetricsRecorder::new();
        assert!(recorder.handle().is_none());
        assert!(recorder.render().is_none());
    }

    #[test]
    fn test_install_and_render() {
        let mut recorder = MetricsRecorder::new();
        assert!(recorder.install().is_ok());

        record_reduce(Duration::from_micros(20), 2);
        record_effect("delay");
        record_cancelled(1);

        // Another test binary may own the global recorder; only check output
        // when this instance installed it.
        if let Some(text) = recorder.render() {
            assert!(text.contains("store_commands_total"));
        }
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_reduce(Duration::from_millis(1), 0);
        record_effect("none");
        record_cancelled(3);
    }
}
