//! Todo-list widget with simulated latency.
//!
//! Items are added, edited inline and deleted. Every mutation waits out a
//! simulated delay before it commits, during which the affected control shows
//! a spinner. Commits raise toasts that dismiss themselves.
//!
//! - Per-row busy state: a pending delete on one row leaves the others usable
//! - Commits re-check their target, so removing a row makes its timers inert
//! - Rendering is a pure function of state ([`WidgetView::build`])
//!
//! # Quick Start
//!
//! ```no_run
//! use todo_widget::{TodoAction, TodoEnvironment, TodoReducer, TodoState, WidgetConfig};
//! use todo_core::environment::SystemClock;
//! use todo_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(SystemClock), WidgetConfig::default());
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! store.send(TodoAction::DraftChanged { text: "Buy milk".to_string() }).await?;
//! let mut handle = store.send(TodoAction::SubmitAdd).await?;
//!
//! // Wait for the simulated latency and the commit
//! handle.wait().await;
//!
//! let texts = store.state(|s| s.texts().join(", ")).await;
//! println!("Todos: {texts}");
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod edit;
pub mod error;
pub mod list;
pub mod reducer;
pub mod toast;
pub mod tracker;
pub mod types;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use command::Command;
pub use config::WidgetConfig;
pub use error::WidgetError;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use tracker::{PendingAction, RowAction};
pub use types::{Todo, TodoAction, TodoId, TodoState, Toast, ToastId, ToastLevel};
pub use validation::{TextBounds, Validation, validate};
pub use view::{WidgetView, render_text};
