//! Services behind the HTTP handlers

pub mod ingest;
pub mod mailer;
pub mod spreadsheet;

pub use ingest::{import_rows, ImportReport, IngestError};
pub use mailer::{Mailer, NotifyError};
pub use spreadsheet::{read_first_sheet, SpreadsheetError};
