use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// The fixed timestamp format used by all three input datasets.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a dataset timestamp. Returns `None` for empty or malformed input;
/// malformed source rows are expected and handled by the caller.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}

/// Parse a `YYYY-MM-DD` filter bound into a UTC timestamp at midnight.
pub fn parse_filter_date(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::DateParse(format!("expected YYYY-MM-DD, got: {s}")))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::DateParse(format!("invalid date: {s}")))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Whole-day span between two timestamps (0 when they coincide).
pub fn whole_days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days()
}

/// English month name for a zero-indexed month.
pub fn month_name(month0: u8) -> &'static str {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    MONTHS[month0 as usize % 12]
}

/// Short weekday name, 0 = Sunday.
pub fn weekday_name(weekday: u8) -> &'static str {
    const DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    DAYS[weekday as usize % 7]
}
