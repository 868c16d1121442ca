//! Integration tests for the todo widget with the Store
//!
//! Time is paused, so simulated latency and toast timers elapse instantly
//! whenever the runtime is otherwise idle.

use std::sync::Arc;
use std::time::Duration;
use todo_runtime::{Store, StoreError};
use todo_testing::test_clock;
use todo_widget::reducer::{MSG_ADDED, MSG_DELETED, row_effect_id};
use todo_widget::{
    TodoAction, TodoEnvironment, TodoId, TodoReducer, TodoState, WidgetConfig, WidgetView,
    render_text,
};

type WidgetStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

fn widget_store() -> WidgetStore {
    todo_testing::init_test_tracing();
    let env = TodoEnvironment::new(Arc::new(test_clock()), WidgetConfig::default());
    Store::new(TodoState::new(), TodoReducer::new(), env)
}

async fn add(store: &WidgetStore, text: &str) -> Result<(), StoreError> {
    store
        .send(TodoAction::DraftChanged {
            text: text.to_string(),
        })
        .await?;
    let mut handle = store.send(TodoAction::SubmitAdd).await?;
    handle.wait().await;
    Ok(())
}

async fn texts(store: &WidgetStore) -> Vec<String> {
    store
        .state(|s| s.todos.iter().map(|t| t.text.clone()).collect())
        .await
}

async fn row_id(store: &WidgetStore, index: usize) -> TodoId {
    store
        .state(|s| s.todos.at(index).map(|t| t.id))
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_add_edit_delete_scenario() -> Result<(), StoreError> {
    let store = widget_store();

    // Add "Buy milk"
    store
        .send(TodoAction::DraftChanged {
            text: "Buy milk".to_string(),
        })
        .await?;
    let mut handle = store.send(TodoAction::SubmitAdd).await?;
    assert!(store.state(|s| s.tracker.is_adding()).await);
    assert!(texts(&store).await.is_empty());
    handle.wait().await;
    assert_eq!(texts(&store).await, vec!["Buy milk"]);

    // "ab" is too short: nothing is scheduled
    store
        .send(TodoAction::DraftChanged {
            text: "ab".to_string(),
        })
        .await?;
    let handle = store.send(TodoAction::SubmitAdd).await?;
    assert_eq!(handle.pending(), 0);
    assert_eq!(texts(&store).await, vec!["Buy milk"]);

    // Edit the first item
    let id = row_id(&store, 0).await;
    store.send(TodoAction::StartEditing { id }).await?;
    store
        .send(TodoAction::EditChanged {
            text: "Buy oat milk".to_string(),
        })
        .await?;
    let mut handle = store.send(TodoAction::SaveEditing).await?;
    handle.wait().await;
    assert_eq!(texts(&store).await, vec!["Buy oat milk"]);
    assert_eq!(store.state(|s| s.todos.at(0).map(|t| t.id)).await, Some(id));
    assert_eq!(store.state(|s| s.edit.editing_id()).await, None);

    // Delete it
    let mut handle = store.send(TodoAction::Delete { id }).await?;
    assert_eq!(store.in_flight(&row_effect_id(id)), 1);
    handle.wait().await;
    assert!(texts(&store).await.is_empty());
    assert_eq!(store.in_flight(&row_effect_id(id)), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_busy_indicator_tracks_each_row() -> Result<(), StoreError> {
    let store = widget_store();
    add(&store, "one one").await?;
    add(&store, "two two").await?;
    add(&store, "three three").await?;
    let first = row_id(&store, 0).await;
    let third = row_id(&store, 2).await;

    let mut a = store.send(TodoAction::Delete { id: first }).await?;
    let mut b = store.send(TodoAction::Delete { id: third }).await?;

    let busy = store
        .state(|s| WidgetView::build(s, &WidgetConfig::default()).busy_rows())
        .await;
    assert_eq!(busy, vec![first, third]);

    futures::future::join(a.wait(), b.wait()).await;
    assert_eq!(texts(&store).await, vec!["two two"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_toasts_auto_dismiss() -> Result<(), StoreError> {
    let store = widget_store();
    add(&store, "Buy milk").await?;

    let messages: Vec<String> = store
        .state(|s| s.toasts.iter().map(|t| t.message.clone()).collect())
        .await;
    assert_eq!(messages, vec![MSG_ADDED]);

    tokio::time::sleep(Duration::from_millis(2_100)).await;
    assert!(store.state(|s| s.toasts.is_empty()).await);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_pending_commit() -> Result<(), StoreError> {
    let store = widget_store();
    add(&store, "Buy milk").await?;
    let id = row_id(&store, 0).await;

    let mut handle = store.send(TodoAction::Delete { id }).await?;
    store.send(TodoAction::Teardown).await?;
    handle.wait().await;

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(texts(&store).await, vec!["Buy milk"]);
    assert!(store.state(|s| s.tracker.is_idle()).await);
    assert!(store.state(|s| s.toasts.is_empty()).await);
    assert_eq!(store.pending_effects(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_observers_see_committed_state() -> Result<(), StoreError> {
    let store = widget_store();
    let mut rx = store.subscribe_actions();

    store
        .send(TodoAction::DraftChanged {
            text: "Walk dog".to_string(),
        })
        .await?;
    store.send(TodoAction::SubmitAdd).await?;

    let received = rx.recv().await.ok();
    assert_eq!(
        received,
        Some(TodoAction::AddCommitted {
            text: "Walk dog".to_string()
        })
    );
    assert_eq!(texts(&store).await, vec!["Walk dog"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rendered_text_after_commits() -> Result<(), StoreError> {
    let store = widget_store();
    add(&store, "Buy milk").await?;
    add(&store, "Walk dog").await?;
    let first = row_id(&store, 0).await;
    let mut handle = store.send(TodoAction::Delete { id: first }).await?;
    handle.wait().await;

    let text = store
        .state(|s| render_text(&WidgetView::build(s, &WidgetConfig::default())))
        .await;
    assert!(text.contains("  1. Walk dog [Edit] [Delete]"));
    assert!(text.contains(&format!("<!!> {MSG_DELETED}")));
    assert!(!text.contains("Buy milk"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_after_teardown() -> Result<(), StoreError> {
    let store = widget_store();
    add(&store, "Buy milk").await?;
    store
        .send(TodoAction::Delete {
            id: row_id(&store, 0).await,
        })
        .await?;

    store.send(TodoAction::Teardown).await?;
    store.shutdown(Duration::from_secs(1)).await?;

    assert_eq!(store.pending_effects(), 0);
    assert!(matches!(
        store.send(TodoAction::SubmitAdd).await,
        Err(StoreError::ShutdownInProgress)
    ));
    Ok(())
}
