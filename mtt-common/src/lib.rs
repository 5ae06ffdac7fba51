//! # MTT Common Library
//!
//! Shared code for the meeting task tracker:
//! - Task model and status types
//! - Tolerant date normalization
//! - Spreadsheet row helpers
//! - Database initialization and the task store

pub mod dates;
pub mod db;
pub mod error;
pub mod rows;
pub mod time;

pub use db::{NewTask, StatusFilter, Task, TaskStatus, TaskStore};
pub use error::{Error, Result};
