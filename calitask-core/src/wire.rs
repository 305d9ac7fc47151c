//! The due-date wire format shared with the task storage API.
//!
//! Every due date leaves calitask as `YYYY-MM-DDThh:mm:ssZ`: UTC fields, no
//! fractional seconds, no offset. Stored values in any other shape are
//! re-normalized before they are sent back.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{CaliTaskError, CaliTaskResult};

pub const STRICT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Naive layouts accepted from storage or manual edits; read as UTC wall clock.
const LENIENT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Format a UTC instant in the strict wire form.
pub fn format_strict(instant: DateTime<Utc>) -> String {
    instant.format(STRICT_FORMAT).to_string()
}

/// True when `value` is exactly what [`format_strict`] would produce.
pub fn is_strict(value: &str) -> bool {
    NaiveDateTime::parse_from_str(value, STRICT_FORMAT)
        .map(|naive| format_strict(naive.and_utc()) == value)
        .unwrap_or(false)
}

/// Parse a stored due date in any of the shapes calitask has seen over time.
///
/// RFC 3339 values (with an offset and/or fractional seconds) are converted to
/// UTC. Naive date-times and bare dates are taken as UTC as-is.
pub fn parse_lenient(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    LENIENT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        })
}

/// Re-emit a stored due date in strict form.
///
/// Strict values come back unchanged. Values that cannot be read at all are
/// an error so the caller can keep the stored text untouched.
pub fn normalize_due(stored: &str) -> CaliTaskResult<String> {
    if is_strict(stored) {
        return Ok(stored.to_string());
    }

    parse_lenient(stored)
        .map(format_strict)
        .ok_or_else(|| CaliTaskError::InvalidDueDate(stored.to_string()))
}
