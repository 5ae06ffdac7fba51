//! Spreadsheet upload endpoint
//!
//! `POST /upload` takes a multipart field named `file` holding an `.xlsx`
//! workbook, imports its first sheet and redirects to `/`.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    response::Redirect,
    routing::post,
    Router,
};
use std::path::Path;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::services::{import_rows, read_first_sheet};
use crate::AppState;

/// Largest accepted upload
pub const UPLOAD_LIMIT_BYTES: usize = 32 * 1024 * 1024;

/// Multipart field carrying the workbook
pub const FILE_FIELD: &str = "file";

/// Whether an uploaded file name carries the `.xlsx` extension
pub fn has_xlsx_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// First `file` field of the form: (file name, contents)
async fn read_file_field(multipart: &mut Multipart) -> ApiResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Error retrieving file: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Error retrieving file: {}", e)))?;
        return Ok((file_name, contents));
    }

    Err(ApiError::BadRequest(
        "Error retrieving file: no 'file' field in form".to_string(),
    ))
}

/// POST /upload
pub async fn upload_tasks(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Redirect> {
    let (file_name, contents) = read_file_field(&mut multipart).await?;

    if !has_xlsx_extension(&file_name) {
        return Err(ApiError::BadRequest("File must be .xlsx".to_string()));
    }

    info!("Received upload '{}' ({} bytes)", file_name, contents.len());

    let rows = tokio::task::spawn_blocking(move || read_first_sheet(&contents))
        .await
        .map_err(|e| ApiError::Internal(format!("Error reading Excel file: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("Error reading Excel file: {}", e)))?;

    let report = import_rows(&state.store, &rows).await?;
    info!(
        "Upload '{}' done: {} imported, {} skipped",
        file_name,
        report.imported,
        report.skipped.len()
    );

    Ok(Redirect::to("/"))
}

/// Build upload routes
pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_tasks))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
}
