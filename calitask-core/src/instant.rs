//! Points in time as they appear in calendar feeds.
//!
//! A feed date can be a UTC timestamp, a floating wall-clock time with no zone,
//! or a bare date. The three are kept apart so callers must decide explicitly
//! how a floating or all-day value becomes a concrete UTC instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instant {
    /// `20250310T090000Z`
    Utc(DateTime<Utc>),
    /// `20250310T090000`
    ///
    /// Floating times carry no zone. Comparisons against "now" read the
    /// wall-clock fields as if they were UTC; no local offset is ever applied.
    Floating(NaiveDateTime),
    /// `20250310`, date precision only.
    AllDay(NaiveDate),
}

/// Precision tag of an [`Instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstantKind {
    Utc,
    FloatingLocal,
    AllDay,
}

impl Instant {
    pub fn kind(&self) -> InstantKind {
        match self {
            Instant::Utc(_) => InstantKind::Utc,
            Instant::Floating(_) => InstantKind::FloatingLocal,
            Instant::AllDay(_) => InstantKind::AllDay,
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, Instant::AllDay(_))
    }

    /// Resolve to a concrete UTC instant.
    ///
    /// Floating and all-day values keep their calendar fields as-is: a floating
    /// `09:00` becomes `09:00Z`, an all-day date becomes midnight UTC.
    pub fn resolve_as_utc(&self) -> DateTime<Utc> {
        match self {
            Instant::Utc(dt) => *dt,
            Instant::Floating(dt) => dt.and_utc(),
            Instant::AllDay(d) => d.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// True when this instant lies strictly before `now`.
    ///
    /// All-day instants compare by calendar date against the UTC date of `now`;
    /// timed instants compare at second granularity.
    pub fn is_before(&self, now: DateTime<Utc>) -> bool {
        match self {
            Instant::AllDay(d) => *d < now.date_naive(),
            _ => self.resolve_as_utc().timestamp() < now.timestamp(),
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instant::Utc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            Instant::Floating(dt) => write!(f, "{} (floating)", dt.format("%Y-%m-%d %H:%M:%S")),
            Instant::AllDay(d) => write!(f, "{} (all day)", d.format("%Y-%m-%d")),
        }
    }
}
