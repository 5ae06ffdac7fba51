//! Database models

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire value of the status filter wildcard
pub const ALL_STATUSES: &str = "all";

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    /// Every assignable status, in display order
    pub const ALL: [TaskStatus; 2] = [TaskStatus::InProgress, TaskStatus::Done];

    pub const fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::InProgress => "in progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidInput(format!("Unknown status: {}", s)))
    }
}

/// Status selection for task listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Any status (`"all"`)
    All,
    /// Only tasks in the given status
    Only(TaskStatus),
}

impl StatusFilter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => ALL_STATUSES,
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::Only(TaskStatus::InProgress)
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == ALL_STATUSES {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// A persisted task
///
/// Serialized with camel-case field names for the JSON listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub meeting_date: String,
    pub task_number: String,
    pub task_text: String,
    pub responsibles: String,
    pub deadline: String,
    pub comment: String,
    pub status: TaskStatus,
    pub status_date: String,
}

/// Candidate record handed to [`TaskStore::create`](crate::TaskStore::create)
///
/// Identifier and status timestamp are always assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub meeting_date: String,
    pub task_number: String,
    pub task_text: String,
    pub responsibles: String,
    pub deadline: String,
    pub comment: String,
    /// Defaults to [`TaskStatus::InProgress`] when unset
    pub status: Option<TaskStatus>,
}
