//! mtt-web library interface
//!
//! Exposes the router and application state for the binary and for
//! integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use mtt_common::TaskStore;
use tower_http::trace::TraceLayer;

use crate::services::Mailer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Sole writer of the task table
    pub store: TaskStore,
    /// Outgoing task notifications
    pub mailer: Mailer,
}

impl AppState {
    pub fn new(store: TaskStore, mailer: Mailer) -> Self {
        Self { store, mailer }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages and static assets)
        .merge(api::ui_routes())
        // Task API
        .merge(api::task_routes())
        .merge(api::upload_routes())
        .merge(api::notify_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
