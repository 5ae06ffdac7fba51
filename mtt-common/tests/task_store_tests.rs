//! Integration tests for the task store
//!
//! Each test gets its own SQLite file in a temporary directory.

use mtt_common::db::init::init_database;
use mtt_common::{Error, NewTask, StatusFilter, TaskStatus, TaskStore};
use tempfile::TempDir;

async fn setup_store() -> (TempDir, TaskStore) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("tasks.db"))
        .await
        .expect("Should initialize database");
    (dir, TaskStore::new(pool))
}

fn new_task(text: &str, deadline: &str) -> NewTask {
    NewTask {
        meeting_date: "01.05.2024".to_string(),
        task_number: "1".to_string(),
        task_text: text.to_string(),
        responsibles: "a@x.com, b@y.com".to_string(),
        deadline: deadline.to_string(),
        comment: String::new(),
        status: None,
    }
}

/// Move a task's status timestamp into the past
async fn backdate(store: &TaskStore, id: i64, status_date: &str) {
    sqlx::query("UPDATE tasks SET status_date = ? WHERE id = ?")
        .bind(status_date)
        .bind(id)
        .execute(store.pool())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (_dir, store) = setup_store().await;
    let candidate = NewTask {
        comment: "first pass".to_string(),
        status: Some(TaskStatus::Done),
        ..new_task("Prepare budget", "10.05.2024")
    };

    let id = store.create(&candidate).await.unwrap();
    let task = store.get(id).await.unwrap().expect("Task should exist");

    assert_eq!(task.id, id);
    assert_eq!(task.meeting_date, candidate.meeting_date);
    assert_eq!(task.task_number, candidate.task_number);
    assert_eq!(task.task_text, candidate.task_text);
    assert_eq!(task.responsibles, candidate.responsibles);
    assert_eq!(task.deadline, candidate.deadline);
    assert_eq!(task.comment, candidate.comment);
    assert_eq!(task.status, TaskStatus::Done);
    assert!(!task.status_date.is_empty());
}

#[tokio::test]
async fn test_create_defaults_status_to_in_progress() {
    let (_dir, store) = setup_store().await;

    let id = store.create(&new_task("Call vendor", "")).await.unwrap();
    let task = store.get(id).await.unwrap().unwrap();

    assert_eq!(task.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn test_create_assigns_distinct_ids() {
    let (_dir, store) = setup_store().await;

    let first = store.create(&new_task("One", "")).await.unwrap();
    let second = store.create(&new_task("Two", "")).await.unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_create_rejects_empty_task_text() {
    let (_dir, store) = setup_store().await;

    let result = store.create(&new_task("   ", "10.05.2024")).await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    let all = store.list(StatusFilter::All, 0).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let (_dir, store) = setup_store().await;
    assert!(store.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_overwrites_comment_and_status_only() {
    let (_dir, store) = setup_store().await;
    let id = store.create(&new_task("Draft minutes", "12.05.2024")).await.unwrap();
    backdate(&store, id, "2020-01-01 08:00:00").await;
    let before = store.get(id).await.unwrap().unwrap();

    store.update(id, "sent to board", TaskStatus::Done).await.unwrap();
    let after = store.get(id).await.unwrap().unwrap();

    assert_eq!(after.comment, "sent to board");
    assert_eq!(after.status, TaskStatus::Done);
    assert!(after.status_date > before.status_date, "status timestamp should move forward");
    assert_eq!(after.id, before.id);
    assert_eq!(after.meeting_date, before.meeting_date);
    assert_eq!(after.task_number, before.task_number);
    assert_eq!(after.task_text, before.task_text);
    assert_eq!(after.responsibles, before.responsibles);
    assert_eq!(after.deadline, before.deadline);
}

#[tokio::test]
async fn test_update_missing_task_is_detectable() {
    let (_dir, store) = setup_store().await;

    let result = store.update(999, "nothing", TaskStatus::Done).await;

    assert!(matches!(result, Err(Error::TaskNotFound(999))));
}

#[tokio::test]
async fn test_list_zero_day_window_includes_same_day_tasks() {
    let (_dir, store) = setup_store().await;
    store.create(&new_task("Today", "")).await.unwrap();

    let tasks = store.list(StatusFilter::All, 0).await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].task_text, "Today");
}

#[tokio::test]
async fn test_list_excludes_tasks_outside_window() {
    let (_dir, store) = setup_store().await;
    let recent = store.create(&new_task("Recent", "")).await.unwrap();
    let stale = store.create(&new_task("Stale", "")).await.unwrap();
    backdate(&store, stale, "2001-02-03 04:05:06").await;

    let tasks = store.list(StatusFilter::All, 7).await.unwrap();

    let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![recent]);
}

#[tokio::test]
async fn test_list_window_applies_to_all_statuses_filter() {
    let (_dir, store) = setup_store().await;
    let stale = store.create(&new_task("Stale", "")).await.unwrap();
    backdate(&store, stale, "2001-02-03 04:05:06").await;

    assert!(store.list(StatusFilter::All, 30).await.unwrap().is_empty());
    assert_eq!(store.list(StatusFilter::All, 1_000_000).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let (_dir, store) = setup_store().await;
    let open = store.create(&new_task("Open item", "")).await.unwrap();
    let closed = store.create(&new_task("Closed item", "")).await.unwrap();
    store.update(closed, "", TaskStatus::Done).await.unwrap();

    let in_progress = store
        .list(StatusFilter::Only(TaskStatus::InProgress), 7)
        .await
        .unwrap();
    let done = store.list(StatusFilter::Only(TaskStatus::Done), 7).await.unwrap();
    let all = store.list(StatusFilter::All, 7).await.unwrap();

    assert_eq!(in_progress.iter().map(|t| t.id).collect::<Vec<_>>(), vec![open]);
    assert_eq!(done.iter().map(|t| t.id).collect::<Vec<_>>(), vec![closed]);
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_list_orders_deadlines_chronologically() {
    let (_dir, store) = setup_store().await;
    // Lexically "02.06.2024" < "15.05.2024" < "30.04.2024"
    store.create(&new_task("June", "02.06.2024")).await.unwrap();
    store.create(&new_task("Unscheduled", "when possible")).await.unwrap();
    store.create(&new_task("April", "30.04.2024")).await.unwrap();
    store.create(&new_task("May", "15.05.2024")).await.unwrap();

    let tasks = store.list(StatusFilter::All, 7).await.unwrap();
    let order: Vec<&str> = tasks.iter().map(|t| t.task_text.as_str()).collect();

    assert_eq!(order, vec!["April", "May", "June", "Unscheduled"]);
}

#[tokio::test]
async fn test_unknown_status_in_table_is_reported() {
    let (_dir, store) = setup_store().await;
    let id = store.create(&new_task("Legacy", "")).await.unwrap();
    sqlx::query("UPDATE tasks SET status = 'archived' WHERE id = ?")
        .bind(id)
        .execute(store.pool())
        .await
        .unwrap();

    let result = store.get(id).await;

    assert!(matches!(result, Err(Error::CorruptRecord { id: bad, .. }) if bad == id));
}

#[tokio::test]
async fn test_clear_removes_everything() {
    let (_dir, store) = setup_store().await;
    store.create(&new_task("One", "")).await.unwrap();
    store.create(&new_task("Two", "")).await.unwrap();

    let removed = store.clear().await.unwrap();

    assert_eq!(removed, 2);
    assert!(store.list(StatusFilter::All, 0).await.unwrap().is_empty());
}
