//! Spreadsheet ingestion
//!
//! Sheet layout:
//! - row 1, cell A: meeting date, applied to every task of the upload;
//! - rows 2..: task number, task text, responsible parties, deadline.
//!
//! Rows are imported best-effort: a short, blank or failing row is logged
//! and skipped, and never aborts the rest of the batch. Only a sheet with
//! fewer than two rows is rejected as a whole.

use mtt_common::dates::normalize_imported_date;
use mtt_common::rows::{cell, is_row_empty};
use mtt_common::{NewTask, TaskStatus, TaskStore};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Header row plus at least one task row
pub const MIN_ROWS: usize = 2;

/// Task number, text, responsible parties, deadline
pub const MIN_TASK_COLUMNS: usize = 4;

/// Upload-level rejection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("File must contain at least 2 rows")]
    TooFewRows { found: usize },
}

/// Why a sheet row did not become a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    InsufficientColumns(usize),
    EmptyRow,
    EmptyTaskText,
    StoreFailure(String),
}

/// A skipped row, numbered as in the spreadsheet (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row_number: usize,
    pub reason: SkipReason,
}

/// Outcome of one upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub meeting_date: String,
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Convert one task row into a candidate record.
pub fn task_from_row(row: &[String], meeting_date: &str) -> Result<NewTask, SkipReason> {
    if row.len() < MIN_TASK_COLUMNS {
        return Err(SkipReason::InsufficientColumns(row.len()));
    }
    if is_row_empty(row) {
        return Err(SkipReason::EmptyRow);
    }

    let task = NewTask {
        meeting_date: meeting_date.to_string(),
        task_number: cell(row, 0).trim().to_string(),
        task_text: cell(row, 1).trim().to_string(),
        responsibles: cell(row, 2).trim().to_string(),
        deadline: normalize_imported_date(cell(row, 3).trim()),
        comment: String::new(),
        status: Some(TaskStatus::InProgress),
    };

    if task.task_text.is_empty() {
        return Err(SkipReason::EmptyTaskText);
    }
    Ok(task)
}

/// Import the rows of one worksheet into `store`.
pub async fn import_rows(
    store: &TaskStore,
    rows: &[Vec<String>],
) -> Result<ImportReport, IngestError> {
    if rows.len() < MIN_ROWS {
        return Err(IngestError::TooFewRows { found: rows.len() });
    }

    let meeting_date = rows
        .first()
        .map(|header| normalize_imported_date(cell(header, 0)))
        .unwrap_or_default();

    let mut report = ImportReport {
        meeting_date,
        ..Default::default()
    };

    for (index, row) in rows.iter().enumerate().skip(1) {
        let row_number = index + 1;

        let outcome = match task_from_row(row, &report.meeting_date) {
            Ok(task) => store
                .create(&task)
                .await
                .map_err(|e| SkipReason::StoreFailure(e.to_string())),
            Err(reason) => Err(reason),
        };

        match outcome {
            Ok(id) => {
                debug!(row = row_number, id, "Imported task");
                report.imported += 1;
            }
            Err(reason) => {
                match &reason {
                    SkipReason::InsufficientColumns(found) => {
                        warn!("Skipping row {}: insufficient columns ({})", row_number, found)
                    }
                    SkipReason::EmptyRow => debug!("Skipping row {}: empty", row_number),
                    SkipReason::EmptyTaskText => {
                        warn!("Skipping row {}: empty task text", row_number)
                    }
                    SkipReason::StoreFailure(err) => {
                        warn!("Error inserting task at row {}: {}", row_number, err)
                    }
                }
                report.skipped.push(SkippedRow { row_number, reason });
            }
        }
    }

    info!(
        "Successfully imported {} tasks ({} rows skipped)",
        report.imported,
        report.skipped.len()
    );
    Ok(report)
}
