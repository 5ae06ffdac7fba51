//! Task store
//!
//! Sole owner and writer of the `tasks` table. Every operation is a single
//! statement; there are no multi-statement transactions and concurrent
//! updates of one task are last-write-wins.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::db::models::{NewTask, StatusFilter, Task, TaskStatus};
use crate::{dates, time, Error, Result};

/// Explicitly constructed handle over the task table
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Persist a new task and return its store-assigned identifier.
    ///
    /// The status timestamp is always "now"; an unset status becomes
    /// `in progress`. Empty task text is rejected.
    pub async fn create(&self, task: &NewTask) -> Result<i64> {
        if task.task_text.trim().is_empty() {
            return Err(Error::InvalidInput("task text must not be empty".to_string()));
        }

        let status = task.status.unwrap_or_default();
        let deadline_key = dates::sort_key(&task.deadline);

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (
                meeting_date, task_number, task_text, responsibles,
                deadline, deadline_key, comment, status, status_date
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.meeting_date)
        .bind(&task.task_number)
        .bind(&task.task_text)
        .bind(&task.responsibles)
        .bind(&task.deadline)
        .bind(&deadline_key)
        .bind(&task.comment)
        .bind(status.as_str())
        .bind(time::timestamp_now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Tasks whose status timestamp falls on or after `today - days`,
    /// restricted to `filter`.
    ///
    /// The window applies to [`StatusFilter::All`] as well. Results are
    /// ordered by deadline: parseable deadlines chronologically, the rest
    /// after them by their text.
    pub async fn list(&self, filter: StatusFilter, days: i64) -> Result<Vec<Task>> {
        let cutoff = time::cutoff_date(time::now().date_naive(), days)
            .format(time::DAY_FORMAT)
            .to_string();

        debug!(filter = filter.as_str(), days, %cutoff, "Listing tasks");

        let rows = match filter {
            StatusFilter::All => {
                sqlx::query(
                    r#"
                    SELECT id, meeting_date, task_number, task_text, responsibles,
                           deadline, comment, status, status_date
                    FROM tasks
                    WHERE date(status_date) >= ?
                    ORDER BY deadline_key IS NULL, deadline_key, deadline, id
                    "#,
                )
                .bind(&cutoff)
                .fetch_all(&self.pool)
                .await?
            }
            StatusFilter::Only(status) => {
                sqlx::query(
                    r#"
                    SELECT id, meeting_date, task_number, task_text, responsibles,
                           deadline, comment, status, status_date
                    FROM tasks
                    WHERE status = ? AND date(status_date) >= ?
                    ORDER BY deadline_key IS NULL, deadline_key, deadline, id
                    "#,
                )
                .bind(status.as_str())
                .bind(&cutoff)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(task_from_row).collect()
    }

    /// Fetch one task by identifier
    pub async fn get(&self, id: i64) -> Result<Option<Task>> {
        let row = sqlx::query(
            r#"
            SELECT id, meeting_date, task_number, task_text, responsibles,
                   deadline, comment, status, status_date
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(task_from_row).transpose()
    }

    /// Overwrite comment and status and reset the status timestamp.
    ///
    /// Returns [`Error::TaskNotFound`] when no row has `id`.
    pub async fn update(&self, id: i64, comment: &str, status: TaskStatus) -> Result<()> {
        let result = sqlx::query(
            "UPDATE tasks SET comment = ?, status = ?, status_date = ? WHERE id = ?",
        )
        .bind(comment)
        .bind(status.as_str())
        .bind(time::timestamp_now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::TaskNotFound(id));
        }
        Ok(())
    }

    /// Delete every task (maintenance/reset only). Returns the number removed.
    pub async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

fn task_from_row(row: &SqliteRow) -> Result<Task> {
    let id: i64 = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    let status = status.parse::<TaskStatus>().map_err(|_| Error::CorruptRecord {
        id,
        reason: format!("unknown status '{}'", status),
    })?;

    Ok(Task {
        id,
        meeting_date: row.try_get("meeting_date")?,
        task_number: row.try_get("task_number")?,
        task_text: row.try_get("task_text")?,
        responsibles: row.try_get("responsibles")?,
        deadline: row.try_get("deadline")?,
        comment: row.try_get("comment")?,
        status,
        status_date: row.try_get("status_date")?,
    })
}
