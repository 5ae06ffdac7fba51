//! Timestamp utilities
//!
//! Status timestamps are stored as local wall-clock text
//! (`YYYY-MM-DD HH:MM:SS`) so SQLite's `date()` can cut them to a day.

use chrono::{DateTime, Local, NaiveDate, TimeDelta};

/// Layout of stored status timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of the day bound used by recency filters
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Get current local timestamp
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Current local time rendered as a status timestamp
pub fn timestamp_now() -> String {
    now().format(TIMESTAMP_FORMAT).to_string()
}

/// Earliest calendar day inside a recency window of `days` ending `today`.
///
/// Zero keeps only `today`; negative windows point into the future. The
/// result is clamped to four-digit years so its text form compares
/// correctly against stored timestamps.
pub fn cutoff_date(today: NaiveDate, days: i64) -> NaiveDate {
    let earliest = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
    let latest = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX);

    match TimeDelta::try_days(days).and_then(|window| today.checked_sub_signed(window)) {
        Some(date) => date.clamp(earliest, latest),
        None if days >= 0 => earliest,
        None => latest,
    }
}
