//! Static asset handlers
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const TASKS_CSS: &str = include_str!("../../../ui/tasks.css");
const TASKS_JS: &str = include_str!("../../../ui/tasks.js");

fn asset(content_type: &'static str, body: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", content_type),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        body,
    )
        .into_response()
}

/// GET /static/tasks.css
pub async fn serve_tasks_css() -> Response {
    asset("text/css", TASKS_CSS)
}

/// GET /static/tasks.js
///
/// Filter form and "send email" buttons of the index page
pub async fn serve_tasks_js() -> Response {
    asset("application/javascript", TASKS_JS)
}
