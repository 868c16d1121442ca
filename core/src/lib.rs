//! # Todo Core
//!
//! Core traits and types for the composable todo widget.
//!
//! The widget is built as a unidirectional data-flow loop:
//!
//! - **State**: owned domain data for a feature
//! - **Action**: every input a feature reacts to (user intents, timer completions)
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: side effect descriptions (not execution)
//! - **Environment**: injected dependencies (clock)
//!
//! Effects are values. The runtime crate executes them and feeds any action
//! they produce back into the reducer.
//!
//! ## Example
//!
//! ```
//! use todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//! use std::time::Duration;
//!
//! #[derive(Debug, Clone, Default)]
//! struct PingState {
//!     waiting: bool,
//! }
//!
//! #[derive(Debug, Clone)]
//! enum PingAction {
//!     Ping,
//!     Pong,
//! }
//!
//! struct PingReducer;
//!
//! impl Reducer for PingReducer {
//!     type State = PingState;
//!     type Action = PingAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut PingState,
//!         action: PingAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<PingAction>; 4]> {
//!         match action {
//!             PingAction::Ping => {
//!                 state.waiting = true;
//!                 smallvec![Effect::delay(Duration::from_millis(10), PingAction::Pong)]
//!             },
//!             PingAction::Pong => {
//!                 state.waiting = false;
//!                 smallvec![Effect::None]
//!             },
//!         }
//!     }
//! }
//!
//! let mut state = PingState::default();
//! let effects = PingReducer.reduce(&mut state, PingAction::Ping, &());
//! assert!(state.waiting);
//! assert_eq!(effects.len(), 1);
//! ```

// Re-export commonly used types
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce zero to two effects, so effects are returned
        /// inline in a `SmallVec` to avoid a heap allocation per action.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and can be grouped for cancellation.
pub mod effect {
    use std::fmt;
    use std::time::Duration;

    /// Identifier grouping in-flight effects so they can be cancelled together
    ///
    /// Any number of effects may share an id. [`Effect::Cancel`] aborts every
    /// effect still running under it.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_core::effect::EffectId;
    ///
    /// let id = EffectId::new("todo:42");
    /// assert_eq!(id.as_str(), "todo:42");
    /// assert_eq!(id.to_string(), "todo:42");
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct EffectId(String);

    impl EffectId {
        /// Create an effect id from any string-like key
        #[must_use]
        pub fn new(key: impl Into<String>) -> Self {
            Self(key.into())
        }

        /// Returns the key as a string slice
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for EffectId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Delayed action (simulated latency, auto-dismiss timers)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Run the inner effect under a cancellation id
        Cancellable {
            /// Group the inner effect's tasks are registered under
            id: EffectId,
            /// The effect to run
            effect: Box<Effect<Action>>,
        },

        /// Abort every in-flight effect registered under the id
        ///
        /// Cancelling an id with nothing in flight is a no-op.
        Cancel(EffectId),
    }

    impl<Action> fmt::Debug for Effect<Action>
    where
        Action: fmt::Debug,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Dispatch `action` after `duration`
        #[must_use]
        pub fn delay(duration: Duration, action: Action) -> Effect<Action> {
            Effect::Delay {
                duration,
                action: Box::new(action),
            }
        }

        /// Register this effect under `id` so a later [`Effect::Cancel`] can abort it
        #[must_use]
        pub fn cancellable(self, id: EffectId) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(self),
            }
        }

        /// Returns true for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// The action a [`Effect::Delay`] will dispatch, looking through
        /// any [`Effect::Cancellable`] wrapper
        #[must_use]
        pub fn delayed_action(&self) -> Option<&Action> {
            match self {
                Effect::Delay { action, .. } => Some(action.as_ref()),
                Effect::Cancellable { effect, .. } => effect.delayed_action(),
                _ => None,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// The todo widget derives item ids from the clock, so tests inject a
    /// deterministic clock instead of [`SystemClock`].
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
