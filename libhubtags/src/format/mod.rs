//! Human-readable data formatting utilities.
//!
//! Sizes use the compact `1.50KB` style shown in tag listings, and
//! timestamps are the RFC 3339 strings the registry returns.

use chrono::{DateTime, Utc};
use chrono_humanize::Humanize;


/// Magnitude suffixes, from bytes up to petabytes.
const UNITS: [char; 6] = ['B', 'K', 'M', 'G', 'T', 'P'];

/// Formats a byte size into a compact human-readable string.
///
/// A size of zero renders as `?` because the registry reports zero for
/// tags whose size it does not know.
///
/// # Examples
///
/// ```
/// use libhubtags::format::format_size;
///
/// assert_eq!(format_size(0), "?");
/// assert_eq!(format_size(512), "512B");
/// assert_eq!(format_size(1536), "1.50KB");
/// assert_eq!(format_size(5 * 1024 * 1024), "5.00MB");
/// ```
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return "?".to_string();
    }

    let mut quotient = size_bytes;
    let mut remainder = 0;
    let mut unit = 0;
    while quotient >= 1024 && unit < UNITS.len() - 1 {
        remainder = quotient % 1024;
        quotient /= 1024;
        unit += 1;
    }

    if unit == 0 {
        format!("{}B", quotient)
    } else {
        let frac = remainder * 100 / 1024;
        format!("{}.{:02}{}B", quotient, frac, UNITS[unit])
    }
}

/// Formats an optional byte size, treating a missing size like zero.
pub fn format_optional_size(size_bytes: Option<u64>) -> String {
    format_size(size_bytes.unwrap_or(0))
}

/// Parses a registry timestamp.
///
/// Returns `None` for anything that is not RFC 3339.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Formats a registry timestamp as `YYYY-MM-DD HH:MM` (UTC).
///
/// Unparseable input renders as an empty string rather than failing, so a
/// single odd record never breaks a report.
///
/// # Examples
///
/// ```
/// use libhubtags::format::format_date;
///
/// assert_eq!(format_date("2024-03-01T12:34:56.789Z"), "2024-03-01 12:34");
/// assert_eq!(format_date("yesterday"), "");
/// ```
pub fn format_date(timestamp: &str) -> String {
    parse_timestamp(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Formats a timestamp into a human-readable relative string.
///
/// # Examples
///
/// ```
/// use libhubtags::format::format_timestamp;
/// use chrono::{Duration, Utc};
///
/// let one_day_ago = Utc::now() - Duration::days(1);
/// assert_eq!(format_timestamp(&one_day_ago), "a day ago");
/// ```
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.humanize()
}
