//! DTSTART value classification.

use chrono::{NaiveDate, NaiveDateTime};

use crate::instant::Instant;

/// Classify a DTSTART value into an [`Instant`].
///
/// Recognized shapes, tested in this order:
/// - `YYYYMMDDThhmmssZ` → [`Instant::Utc`]
/// - `YYYYMMDDThhmmss` → [`Instant::Floating`]
/// - `YYYYMMDD` → [`Instant::AllDay`]
///
/// Anything else, including right-shaped values whose fields are not a real
/// date or time (month 13, hour 25), yields `None`.
pub fn classify(raw: &str) -> Option<Instant> {
    let value = raw.trim();
    let bytes = value.as_bytes();

    match bytes.len() {
        16 if is_date_time_shape(bytes) && bytes[15] == b'Z' => {
            date_time_at(value).map(|dt| Instant::Utc(dt.and_utc()))
        }
        15 if is_date_time_shape(bytes) => date_time_at(value).map(Instant::Floating),
        8 if all_digits(bytes) => date_at(value).map(Instant::AllDay),
        _ => None,
    }
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

fn is_date_time_shape(bytes: &[u8]) -> bool {
    all_digits(&bytes[..8]) && bytes[8] == b'T' && all_digits(&bytes[9..15])
}

fn date_at(value: &str) -> Option<NaiveDate> {
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// Time fields sit at fixed offsets after the `T` at position 8.
fn date_time_at(value: &str) -> Option<NaiveDateTime> {
    let hour = value[9..11].parse().ok()?;
    let minute = value[11..13].parse().ok()?;
    let second = value[13..15].parse().ok()?;
    date_at(value)?.and_hms_opt(hour, minute, second)
}
