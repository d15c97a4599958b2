// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and coercion.
//!
//! Calendar dates are stored as `YYYY-MM-DD` so that lexical ordering in
//! SQLite matches chronological ordering. Older rows may carry a full
//! RFC3339 timestamp instead; the parsers below accept both.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a UTC timestamp as RFC3339 with microsecond precision and a `Z` suffix.
///
/// Fixed width, so two timestamps compare the same way as strings and as instants.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Format a calendar date for storage.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a date-like string: `YYYY-MM-DD` or an RFC3339 timestamp.
///
/// Timestamps are reduced to the calendar date in their own offset. A `Z`
/// timestamp carries no trace of the sender's zone, so its UTC date is used;
/// that can be a day early for a date picked east of UTC.
pub fn parse_date_like(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse a stored timestamp: RFC3339, or SQLite's `CURRENT_TIMESTAMP` layout (UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
