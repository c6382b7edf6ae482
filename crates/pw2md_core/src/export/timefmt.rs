//! Epoch-millisecond display formatting in local time.
//!
//! # Invariants
//! - Formatting truncates to whole seconds.
//! - `parse_display_time(format_epoch_ms(ms, DISPLAY_TIME_PATTERN))` returns
//!   `ms` truncated to whole seconds, except for instants inside a repeated
//!   (DST fall-back) local hour.

use chrono::{Local, NaiveDateTime, TimeZone};

/// Pattern used in metadata documents and article headers.
pub const DISPLAY_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
/// Pattern used in `Untitled-<stamp>` file names.
pub const FILE_STAMP_PATTERN: &str = "%Y_%m_%d_%H_%M_%S";

/// Formats a Unix epoch millisecond value in the local time zone.
///
/// Out-of-range instants fall back to the raw millisecond number.
pub fn format_epoch_ms(epoch_ms: i64, pattern: &str) -> String {
    let secs = epoch_ms.div_euclid(1000);
    match Local.timestamp_opt(secs, 0).single() {
        Some(datetime) => datetime.format(pattern).to_string(),
        None => epoch_ms.to_string(),
    }
}

/// Formats with `DISPLAY_TIME_PATTERN`.
pub fn format_display_time(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, DISPLAY_TIME_PATTERN)
}

/// Parses a `DISPLAY_TIME_PATTERN` string back to epoch milliseconds.
///
/// Returns `None` for malformed text or a local time that does not exist.
/// A repeated local time (the hour after a DST fall-back) resolves to its
/// earlier instant, so round-trips only hold outside that hour.
pub fn parse_display_time(text: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), DISPLAY_TIME_PATTERN).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|datetime| datetime.timestamp_millis())
}
