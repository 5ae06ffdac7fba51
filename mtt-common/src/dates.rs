//! Tolerant date normalization
//!
//! Dates reach the tracker as free text: typed into spreadsheet cells,
//! rendered by the spreadsheet reader, or stored by earlier imports. Every
//! variant here tries the same ordered list of layouts and renders the first
//! match as `DD.MM.YYYY`. Text that matches no layout is passed through, so
//! callers must treat dates as opaque strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Canonical display layout (`01.05.2024`)
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Layout of the sortable deadline key stored next to the display string
pub const SORT_KEY_FORMAT: &str = "%Y-%m-%d";

/// Placeholder shown in pages for an empty date
pub const MISSING_DATE: &str = "N/A";

#[derive(Debug, Clone, Copy)]
enum Layout {
    /// Date and time; fractional seconds may follow the seconds field
    DateTime { format: &'static str, shape: &'static str },
    Date { format: &'static str, shape: &'static str },
    Rfc3339,
}

/// Accepted input layouts, tried in order
///
/// A shape pins the field widths: `9` is exactly one ASCII digit, `h` is a
/// one- or two-digit hour, any other character must appear as written.
const LAYOUTS: [Layout; 5] = [
    Layout::DateTime {
        format: "%Y-%m-%d %H:%M:%S",
        shape: "9999-99-99 h:99:99",
    },
    Layout::Date {
        format: "%Y-%m-%d",
        shape: "9999-99-99",
    },
    Layout::Date {
        format: "%d.%m.%Y",
        shape: "99.99.9999",
    },
    Layout::DateTime {
        format: "%d.%m.%Y %H:%M:%S",
        shape: "99.99.9999 h:99:99",
    },
    Layout::Rfc3339,
];

/// Length of the prefix of `input` that matches `shape`
fn shape_prefix(input: &str, shape: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut pos = 0;
    for expected in shape.bytes() {
        let actual = *bytes.get(pos)?;
        match expected {
            b'9' | b'h' if !actual.is_ascii_digit() => return None,
            b'9' => pos += 1,
            b'h' => {
                pos += 1;
                if bytes.get(pos).is_some_and(u8::is_ascii_digit) {
                    pos += 1;
                }
            }
            literal if actual != literal => return None,
            _ => pos += 1,
        }
    }
    Some(pos)
}

/// `.` followed by at least one digit
fn is_fraction(rest: &str) -> bool {
    rest.strip_prefix('.')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

impl Layout {
    fn parse(self, input: &str) -> Option<NaiveDate> {
        match self {
            Layout::DateTime { format, shape } => {
                let (main, rest) = input.split_at(shape_prefix(input, shape)?);
                if !rest.is_empty() && !is_fraction(rest) {
                    return None;
                }
                NaiveDateTime::parse_from_str(main, format)
                    .ok()
                    .map(|dt| dt.date())
            }
            Layout::Date { format, shape } => {
                if shape_prefix(input, shape)? != input.len() {
                    return None;
                }
                NaiveDate::parse_from_str(input, format).ok()
            }
            // Keep the calendar date in the offset the text was written in
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.date_naive()),
        }
    }
}

/// Parse `input` against every known layout and return the calendar date of
/// the first match.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    LAYOUTS.iter().find_map(|layout| layout.parse(input))
}

/// Normalize a date string to `DD.MM.YYYY`.
///
/// Empty input stays empty; unparseable input is returned unchanged.
pub fn normalize_date(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    match parse_date(input) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => input.to_string(),
    }
}

/// Normalization used while importing spreadsheet cells.
///
/// Behaves like [`normalize_date`], except that unparseable input containing
/// a space is cut at the first space so embedded times are not shown.
pub fn normalize_imported_date(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    match parse_date(input) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => match input.split_once(' ') {
            Some((date_part, _time_part)) => date_part.to_string(),
            None => input.to_string(),
        },
    }
}

/// Normalization used by HTML pages: empty input renders as [`MISSING_DATE`].
pub fn display_date(input: &str) -> String {
    if input.is_empty() {
        return MISSING_DATE.to_string();
    }
    normalize_date(input)
}

/// Chronologically sortable key (`YYYY-MM-DD`) for a date string, when it
/// matches any known layout.
pub fn sort_key(input: &str) -> Option<String> {
    parse_date(input).map(|date| date.format(SORT_KEY_FORMAT).to_string())
}
