// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and local calendar days.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};

/// Largest UTC offset accepted from clients, in minutes (UTC±14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build a fixed offset from a client-supplied offset in minutes east of UTC.
///
/// Returns `None` outside ±14 hours.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

/// Calendar date of `timestamp` as seen in `offset`.
pub fn local_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}
