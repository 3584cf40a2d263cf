//! Lenient date parsing for sort keys.
//!
//! Metadata dates are usually `YYYY-MM-DD`; feed dates are RFC 2822
//! (`Tue, 05 Mar 2024 14:30:00 GMT`) or RFC 3339. Everything is normalized to
//! a naive UTC timestamp so the three sources compare against each other.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats tried after RFC 3339 and before falling back to dates.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a date string in any of the supported forms.
///
/// Returns `None` for blank or unrecognized input.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }

    DateTime::parse_from_rfc2822(s).ok().map(|dt| dt.naive_utc())
}
