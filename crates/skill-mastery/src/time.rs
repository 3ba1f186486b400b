//! Time utilities for skill-mastery.
//!
//! All timestamps are Unix epoch milliseconds (i64). Calendar days are
//! `chrono::NaiveDate` keys taken at local midnight unless a zone is given.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Return the current time as milliseconds since Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's calendar day in the local zone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Collapse a millisecond timestamp to its calendar day in `tz`.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn day_key_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(tz).date_naive())
}

/// Collapse a millisecond timestamp to its local calendar day.
pub fn day_key(millis: i64) -> Option<NaiveDate> {
    day_key_in(millis, &Local)
}

/// Convert milliseconds to an RFC 3339 string.
pub fn millis_to_rfc3339(millis: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH);
    dt.to_rfc3339()
}
