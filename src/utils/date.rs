// src/utils/date.rs

//! Due date helpers.
//!
//! Assignments are whole-day deadlines: any time-of-day component is cut off.

use chrono::NaiveDate;

/// Truncate a date or date-time string to its date portion.
///
/// `2026-10-20T23:59:00Z` becomes `2026-10-20`; a date-only value is
/// returned unchanged. Applying it twice gives the same result as once.
pub fn normalize_due_date(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.split_once('T') {
        Some((date, _)) => date,
        None => raw,
    }
}

/// Parse a due date in extended (`2026-10-20`) or basic (`20261020`) form,
/// with or without a time component.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let date = normalize_due_date(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y%m%d"))
        .ok()
}
