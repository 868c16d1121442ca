//! Reducer logic for the todo widget.
//!
//! User triggers are validated, recorded in the tracker and answered with a
//! delayed commit action. Commits re-check their target before touching the
//! list, so a timer that outlives its row is harmless.

use crate::config::WidgetConfig;
use crate::tracker::RowAction;
use crate::types::{TodoAction, TodoId, TodoState, ToastId, ToastLevel};
use std::sync::Arc;
use todo_core::{
    SmallVec,
    effect::{Effect, EffectId},
    environment::Clock,
    reducer::Reducer,
    smallvec,
};

/// Toast shown after an add commits
pub const MSG_ADDED: &str = "Task added!";
/// Toast shown after an update commits
pub const MSG_UPDATED: &str = "Task updated";
/// Toast shown after a delete commits
pub const MSG_DELETED: &str = "Task deleted";

type Effects = SmallVec<[Effect<TodoAction>; 4]>;

/// Cancellation group of the pending add
#[must_use]
pub fn add_effect_id() -> EffectId {
    EffectId::new("todo:add")
}

/// Cancellation group of a row's pending action
#[must_use]
pub fn row_effect_id(id: TodoId) -> EffectId {
    EffectId::new(format!("todo:{id}"))
}

/// Cancellation group of a toast's dismiss timer
#[must_use]
pub fn toast_effect_id(id: ToastId) -> EffectId {
    EffectId::new(format!("toast:{id}"))
}

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock that timestamps new ids
    pub clock: Arc<dyn Clock>,
    /// Delays, bounds and toast limits
    pub config: WidgetConfig,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, config: WidgetConfig) -> Self {
        Self { clock, config }
    }
}

/// Reducer for the todo widget
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn submit_add(state: &mut TodoState, env: &TodoEnvironment) -> Effects {
        let bounds = &env.config.bounds;
        if !bounds.accepts(state.draft.text()) {
            tracing::debug!("add rejected: draft out of bounds");
            return SmallVec::new();
        }
        let text = state.draft.text().trim().to_string();
        if !state.tracker.begin_add(text.clone()) {
            tracing::debug!("add rejected: another add in flight");
            return SmallVec::new();
        }
        tracing::debug!(%text, "add in flight");
        smallvec![
            Effect::delay(env.config.commit_delay(), TodoAction::AddCommitted { text })
                .cancellable(add_effect_id())
        ]
    }

    fn start_editing(state: &mut TodoState, id: TodoId) -> Effects {
        if state.tracker.is_busy(id) {
            tracing::debug!(%id, "edit rejected: row busy");
            return SmallVec::new();
        }
        let Some(todo) = state.todos.get(id) else {
            tracing::debug!(%id, "edit rejected: no such row");
            return SmallVec::new();
        };
        if let Some(previous) = state.edit.begin(id, &todo.text) {
            tracing::debug!(%previous, %id, "edit moved, prior edit discarded");
        }
        SmallVec::new()
    }

    fn save_editing(state: &mut TodoState, env: &TodoEnvironment) -> Effects {
        let Some(id) = state.edit.editing_id() else {
            return SmallVec::new();
        };
        let field = state.edit.field();
        if !env.config.bounds.accepts(field.text()) {
            tracing::debug!(%id, "update rejected: text out of bounds");
            return SmallVec::new();
        }
        let text = field.text().trim().to_string();
        if !state.tracker.begin_row(id, RowAction::Update) {
            tracing::debug!(%id, "update rejected: row busy");
            return SmallVec::new();
        }
        tracing::debug!(%id, %text, "update in flight");
        smallvec![
            Effect::delay(env.config.commit_delay(), TodoAction::UpdateCommitted { id, text })
                .cancellable(row_effect_id(id))
        ]
    }

    fn delete(state: &mut TodoState, env: &TodoEnvironment, id: TodoId) -> Effects {
        if !state.todos.contains(id) {
            tracing::debug!(%id, "delete rejected: no such row");
            return SmallVec::new();
        }
        if !state.tracker.begin_row(id, RowAction::Delete) {
            tracing::debug!(%id, "delete rejected: row busy");
            return SmallVec::new();
        }
        tracing::debug!(%id, "delete in flight");
        smallvec![
            Effect::delay(env.config.commit_delay(), TodoAction::DeleteCommitted { id })
                .cancellable(row_effect_id(id))
        ]
    }

    fn commit_add(state: &mut TodoState, env: &TodoEnvironment, text: &str) -> Effects {
        if !state.tracker.finish_add(text) {
            tracing::debug!(%text, "stale add commit dropped");
            return SmallVec::new();
        }
        let candidate = TodoId::new(env.clock.now().timestamp_millis());
        let Some(id) = state.todos.add(candidate, text, &env.config.bounds) else {
            tracing::debug!(%text, "add commit rejected by list");
            return SmallVec::new();
        };
        if state.draft.text().trim() == text {
            state.draft.clear();
        }
        tracing::info!(%id, %text, "todo added");
        Self::notify(state, env, ToastLevel::Success, MSG_ADDED)
    }

    fn commit_update(
        state: &mut TodoState,
        env: &TodoEnvironment,
        id: TodoId,
        text: &str,
    ) -> Effects {
        if !state.tracker.finish_row(id, RowAction::Update) {
            tracing::debug!(%id, "stale update commit dropped");
            return SmallVec::new();
        }
        if !state.todos.update(id, text, &env.config.bounds) {
            tracing::debug!(%id, "update commit found no row");
            return SmallVec::new();
        }
        state.edit.clear_if(id);
        tracing::info!(%id, %text, "todo updated");
        Self::notify(state, env, ToastLevel::Success, MSG_UPDATED)
    }

    fn commit_delete(state: &mut TodoState, env: &TodoEnvironment, id: TodoId) -> Effects {
        if !state.tracker.finish_row(id, RowAction::Delete) {
            tracing::debug!(%id, "stale delete commit dropped");
            return SmallVec::new();
        }
        let Some(removed) = state.todos.remove(id) else {
            tracing::debug!(%id, "delete commit found no row");
            return SmallVec::new();
        };
        if state.edit.clear_if(id) {
            tracing::debug!(%id, "edit cleared with deleted row");
        }
        tracing::info!(%id, text = %removed.text, "todo deleted");
        let mut effects: Effects = smallvec![Effect::Cancel(row_effect_id(id))];
        effects.extend(Self::notify(state, env, ToastLevel::Error, MSG_DELETED));
        effects
    }

    fn teardown(state: &mut TodoState) -> Effects {
        let mut effects = Effects::new();
        if state.tracker.is_adding() {
            effects.push(Effect::Cancel(add_effect_id()));
        }
        for id in state.tracker.clear() {
            effects.push(Effect::Cancel(row_effect_id(id)));
        }
        for id in state.toasts.clear() {
            effects.push(Effect::Cancel(toast_effect_id(id)));
        }
        tracing::debug!(cancelled = effects.len(), "widget torn down");
        effects
    }

    /// Shows a toast and schedules its dismissal
    fn notify(
        state: &mut TodoState,
        env: &TodoEnvironment,
        level: ToastLevel,
        message: &str,
    ) -> Effects {
        let (id, evicted) = state.toasts.push(level, message, env.config.max_toasts);
        let mut effects: Effects = evicted
            .into_iter()
            .map(|old| Effect::Cancel(toast_effect_id(old)))
            .collect();
        effects.push(
            Effect::delay(env.config.toast_duration(), TodoAction::ToastExpired { id })
                .cancellable(toast_effect_id(id)),
        );
        effects
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Add form ==========
            TodoAction::DraftChanged { text } => {
                state.draft.set(text);
                SmallVec::new()
            },
            TodoAction::SubmitAdd => Self::submit_add(state, env),

            // ========== Inline edit ==========
            TodoAction::StartEditing { id } => Self::start_editing(state, id),
            TodoAction::EditChanged { text } => {
                state.edit.set_text(text);
                SmallVec::new()
            },
            TodoAction::SaveEditing => Self::save_editing(state, env),
            TodoAction::CancelEditing => {
                state.edit.clear();
                SmallVec::new()
            },

            // ========== Delete ==========
            TodoAction::Delete { id } => Self::delete(state, env, id),

            // ========== Commits ==========
            TodoAction::AddCommitted { text } => Self::commit_add(state, env, &text),
            TodoAction::UpdateCommitted { id, text } => {
                Self::commit_update(state, env, id, &text)
            },
            TodoAction::DeleteCommitted { id } => Self::commit_delete(state, env, id),
            TodoAction::ToastExpired { id } => {
                state.toasts.dismiss(id);
                SmallVec::new()
            },

            // ========== Lifecycle ==========
            TodoAction::Teardown => Self::teardown(state),
        }
    }
}
