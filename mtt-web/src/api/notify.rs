//! Email notification endpoint

use axum::{
    extract::{Path, State},
    routing::post,
    Router,
};

use crate::error::{parse_task_id, ApiError, ApiResult};
use crate::AppState;

/// POST /send-email/:id
///
/// Mails the task's responsible parties. Answers with plain text.
pub async fn send_email(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<&'static str> {
    let id = parse_task_id(&raw_id)?;
    let task = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    state.mailer.notify(&task).await?;

    Ok("Email sent successfully")
}

/// Build notification routes
pub fn notify_routes() -> Router<AppState> {
    Router::new().route("/send-email/:id", post(send_email))
}
