//! Error types for mtt-web
//!
//! Handlers answer with plain-text bodies: the browser forms and the page
//! script show the message as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::ingest::IngestError;
use crate::services::mailer::NotifyError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),

    /// Upload rejected before any row was imported (400)
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Notification could not be composed or delivered (500)
    #[error("Error sending email: {0}")]
    Notify(#[from] NotifyError),

    /// mtt-common error
    #[error(transparent)]
    Common(#[from] mtt_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Ingest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) | ApiError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Common(err) => match err {
                mtt_common::Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
                mtt_common::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Parse a task identifier taken from the URL path
pub fn parse_task_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid task ID".to_string()))
}
