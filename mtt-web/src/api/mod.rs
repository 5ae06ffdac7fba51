//! HTTP API handlers for mtt-web

pub mod health;
pub mod notify;
pub mod tasks;
pub mod ui;
pub mod upload;

pub use health::health_routes;
pub use notify::notify_routes;
pub use tasks::task_routes;
pub use ui::ui_routes;
pub use upload::upload_routes;
