//! Database initialization
//!
//! Opens (or creates) the SQLite file and makes sure the `tasks` table
//! exists. Failure here is fatal for the service.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Writers from concurrent requests wait instead of failing immediately
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create the task table and its indexes (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_tasks_table(pool).await
}

async fn create_tasks_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            meeting_date TEXT NOT NULL DEFAULT '',
            task_number TEXT NOT NULL DEFAULT '',
            task_text TEXT NOT NULL,
            responsibles TEXT NOT NULL DEFAULT '',
            deadline TEXT NOT NULL DEFAULT '',
            deadline_key TEXT,
            comment TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'in progress',
            status_date TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_tasks_status_date ON tasks(status, status_date)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
