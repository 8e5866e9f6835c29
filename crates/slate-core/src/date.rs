//! Lenient calendar-date normalization for tracker timestamps.
//!
//! The upstream API emits several inconsistent dialects: plain dates, UTC
//! timestamps with or without fractional seconds, and local timestamps with
//! `+hhmm`/`-hhmm` offsets. Normalization is total: any shape that does not
//! parse resolves to `None`, never an error.

use chrono::{NaiveDate, NaiveDateTime};

/// Normalize an optional date/timestamp string to a calendar date.
///
/// Formats are tried in order, first success wins:
/// 1. `YYYY-MM-DD`
/// 2. `YYYY-MM-DDTHH:MM:SS[.ffffff]Z`
/// 3. `+offset` suffix: everything from the first `+` is dropped and the
///    remainder is parsed as a naive timestamp
/// 4. a `-` after position 10 marks a negative offset: the string is
///    truncated to its first 19 characters before parsing
#[must_use]
pub fn normalize_date(input: Option<&str>) -> Option<NaiveDate> {
    let s = input?.trim();
    if s.is_empty() {
        return None;
    }
    if !s.contains('T') {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    }
    if let Some(head) = s.strip_suffix('Z') {
        return parse_naive(head);
    }
    if let Some((head, _)) = s.split_once('+') {
        return parse_naive(head);
    }
    if s.get(10..).is_some_and(|tail| tail.contains('-')) {
        return parse_naive(s.get(..19)?);
    }
    parse_naive(s)
}

fn parse_naive(s: &str) -> Option<NaiveDate> {
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Render a date back to the `YYYY-MM-DD` form used across the view model.
#[must_use]
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
