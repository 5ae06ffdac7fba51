//! Common error types for the task tracker

use thiserror::Error;

/// Common result type for task tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by the task store and the web service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No task row carries the requested identifier
    #[error("Task {0} not found")]
    TaskNotFound(i64),

    /// Caller supplied a value the store refuses to persist
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A persisted row could not be mapped back into a task
    #[error("Task {id} is unreadable: {reason}")]
    CorruptRecord { id: i64, reason: String },
}
