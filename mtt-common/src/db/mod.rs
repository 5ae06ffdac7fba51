//! Database models and queries

pub mod init;
pub mod models;
pub mod tasks;

pub use init::*;
pub use models::*;
pub use tasks::TaskStore;
