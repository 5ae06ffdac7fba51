//! Task listing and editing endpoints
//!
//! - `GET /tasks?status=&days=` → JSON array of tasks
//! - `POST /update/:id` (form: `comment`, `status`) → redirect to `/`

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use mtt_common::{StatusFilter, Task, TaskStatus};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{parse_task_id, ApiResult};
use crate::AppState;

/// Recency window used when none (or garbage) is requested
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Query parameters for task listing
///
/// Both are kept as raw text: an unparseable `days` falls back to the
/// default window instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub days: Option<String>,
}

impl TaskListQuery {
    /// Requested status filter; missing or blank means `in progress`
    pub fn filter(&self) -> ApiResult<StatusFilter> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(StatusFilter::default()),
            Some(raw) => Ok(raw.parse()?),
        }
    }

    /// Requested window in days, defaulting to [`DEFAULT_WINDOW_DAYS`]
    pub fn days(&self) -> i64 {
        self.days
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_WINDOW_DAYS)
    }
}

/// GET /tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = query.filter()?;
    let days = query.days();

    info!("Fetching tasks: status={}, days={}", filter.as_str(), days);
    let tasks = state.store.list(filter, days).await?;
    debug!("Found {} tasks", tasks.len());

    Ok(Json(tasks))
}

/// Form fields of the edit page
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub status: String,
}

/// POST /update/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<UpdateForm>,
) -> ApiResult<Redirect> {
    let id = parse_task_id(&raw_id)?;
    let status: TaskStatus = form.status.parse()?;

    state.store.update(id, &form.comment, status).await?;
    info!("Task {} updated (status: {})", id, status);

    Ok(Redirect::to("/"))
}

/// Build task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks))
        .route("/update/:id", post(update_task))
}
