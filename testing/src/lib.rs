//! # Todo Testing
//!
//! Testing utilities and helpers for the composable todo widget.
//!
//! This crate provides:
//! - Deterministic clocks for the `Clock` environment trait
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for the effects a reducer returns
//!
//! ## Example
//!
//! ```ignore
//! use todo_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(Arc::new(test_clock()), WidgetConfig::default()))
//!     .given_state(TodoState::default())
//!     .when_action(TodoAction::SubmitAdd)
//!     .then_state(|state| assert!(state.tracker.is_adding()))
//!     .run();
//! ```

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use todo_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{AtomicI64, Clock, DateTime, Duration, Ordering, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::FixedClock;
    /// use todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that moves forward by a fixed step on every read
    ///
    /// Useful where each call must observe a distinct instant, e.g. when
    /// ids are derived from timestamps.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::StepClock;
    /// use todo_core::environment::Clock;
    /// use chrono::{Duration, Utc};
    ///
    /// let start = Utc::now();
    /// let clock = StepClock::new(start, Duration::milliseconds(5));
    /// assert_eq!(clock.now(), start);
    /// assert_eq!(clock.now(), start + Duration::milliseconds(5));
    /// ```
    #[derive(Debug)]
    pub struct StepClock {
        next_millis: AtomicI64,
        step_millis: i64,
    }

    impl StepClock {
        /// Create a clock starting at `start` and advancing by `step` per read
        #[must_use]
        pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next_millis: AtomicI64::new(start.timestamp_millis()),
                step_millis: step.num_milliseconds(),
            }
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let millis = self.next_millis.fetch_add(self.step_millis, Ordering::SeqCst);
            DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, StepClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(time1.timestamp_millis(), 1_735_689_600_000);
    }

    #[test]
    fn test_step_clock_advances_per_read() {
        let start = test_clock().now();
        let clock = StepClock::new(start, Duration::milliseconds(1));
        let readings: Vec<i64> = (0..3).map(|_| clock.now().timestamp_millis()).collect();
        let base = start.timestamp_millis();
        assert_eq!(readings, vec![base, base + 1, base + 2]);
    }

    #[test]
    fn test_init_tracing_twice() {
        init_test_tracing();
        init_test_tracing();
    }
}
