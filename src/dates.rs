//! Date helpers: local time, journal titles, and Core Data timestamps.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z.
pub const CORE_DATA_EPOCH_OFFSET: i64 = 978_307_200;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Returns the local UTC offset, falling back to UTC when it cannot be
/// determined (e.g. when other threads are running).
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Returns the current time in the local offset.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}

/// Formats a date as `YYYY-MM-DD`, the title format of daily journal notes.
pub fn journal_date(at: OffsetDateTime) -> String {
    at.format(DATE_FORMAT).unwrap_or_default()
}

/// Converts a Core Data timestamp to a date-time in `offset`.
pub fn from_core_data(seconds: f64, offset: UtcOffset) -> Option<OffsetDateTime> {
    // Roughly +/- 3000 years; beyond that `Duration` would overflow.
    if !seconds.is_finite() || seconds.abs() > 1e11 {
        return None;
    }
    let unix = OffsetDateTime::from_unix_timestamp(CORE_DATA_EPOCH_OFFSET).ok()?;
    let at = unix.checked_add(Duration::seconds_f64(seconds))?;
    Some(at.to_offset(offset))
}

/// Formats a Core Data timestamp as `YYYY-MM-DD HH:MM:SS` in `offset`.
pub fn format_core_data(seconds: f64, offset: UtcOffset) -> Option<String> {
    from_core_data(seconds, offset)?.format(DATETIME_FORMAT).ok()
}
