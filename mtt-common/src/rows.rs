//! Spreadsheet row helpers

/// A row is empty when every cell is blank after trimming.
///
/// A row without cells is empty too.
pub fn is_row_empty<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|cell| cell.as_ref().trim().is_empty())
}

/// Cell text at `index`, or `""` when the row is shorter than that.
pub fn cell<S: AsRef<str>>(row: &[S], index: usize) -> &str {
    row.get(index).map(AsRef::as_ref).unwrap_or("")
}
