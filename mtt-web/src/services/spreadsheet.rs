//! Spreadsheet reader
//!
//! Turns an uploaded `.xlsx` workbook into the first worksheet's rows of
//! display strings, the shape the ingestion pipeline consumes:
//! - rows and columns are anchored at `A1`, so leading blank rows and
//!   columns are kept as empty cells;
//! - trailing empty cells of each row are dropped, so short rows stay short;
//! - whole numbers render without a fractional part (`3`, not `3.0`);
//! - date cells render as `YYYY-MM-DD HH:MM:SS`.

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx, XlsxError};
use mtt_common::time::TIMESTAMP_FORMAT;
use std::io::Cursor;
use thiserror::Error;

/// Spreadsheet reading errors
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("not a readable workbook: {0}")]
    Workbook(#[from] XlsxError),

    #[error("workbook has no worksheets")]
    NoWorksheet,
}

/// Read every row of the first worksheet as display strings
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<String>>, SpreadsheetError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)??;

    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];

    for row in range.rows() {
        let mut cells: Vec<String> = std::iter::repeat(String::new())
            .take(first_col as usize)
            .chain(row.iter().map(cell_text))
            .collect();
        while cells.last().is_some_and(|cell| cell.is_empty()) {
            cells.pop();
        }
        rows.push(cells);
    }

    Ok(rows)
}

/// Display text of a single cell
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        Data::Float(value) => value.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => datetime.format(TIMESTAMP_FORMAT).to_string(),
            None => value.as_f64().to_string(),
        },
        Data::Error(err) => err.to_string(),
    }
}
