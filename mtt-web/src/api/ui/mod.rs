//! UI Routes - HTML pages for the task tracker
//!
//! - **Index** (`index`): upload form, filter form and task table
//! - **Edit** (`edit`): comment and status form for one task
//! - **Static Assets** (`static_assets`): CSS/JS file serving

use axum::{routing::get, Router};

use crate::AppState;

mod edit;
mod index;
mod static_assets;

pub use edit::render_edit;
pub use index::{render_index, render_task_rows};

use edit::edit_page;
use index::index_page;
use static_assets::{serve_tasks_css, serve_tasks_js};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Page routes
        .route("/", get(index_page))
        .route("/edit/:id", get(edit_page))
        // Static assets
        .route("/static/tasks.css", get(serve_tasks_css))
        .route("/static/tasks.js", get(serve_tasks_js))
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Wrap a page body in the shared document shell
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/tasks.css">
</head>
<body>
<div class="container">
{body}
</div>
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}
