//! RRULE interpretation for repeating todos.
//!
//! Only `FREQ` and `INTERVAL` are read; a rule reduces to "every N units".
//! BYDAY, COUNT, UNTIL and EXDATE are ignored.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CaliTaskError, CaliTaskResult};
use crate::instant::Instant;

/// Upper bound on advances performed by [`next_occurrence`].
pub const MAX_ADVANCE_STEPS: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Day,
    Week,
    Month,
    Year,
}

impl RecurrenceUnit {
    /// Map an RRULE `FREQ` value (case-insensitive) to a unit.
    pub fn from_freq(freq: &str) -> Option<Self> {
        match freq.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Some(RecurrenceUnit::Day),
            "WEEKLY" => Some(RecurrenceUnit::Week),
            "MONTHLY" => Some(RecurrenceUnit::Month),
            "YEARLY" => Some(RecurrenceUnit::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceUnit::Day => "day",
            RecurrenceUnit::Week => "week",
            RecurrenceUnit::Month => "month",
            RecurrenceUnit::Year => "year",
        }
    }
}

/// "Every `interval` `unit`s".
///
/// `interval` is kept signed so that a zero or negative INTERVAL from a feed
/// survives parsing and is rejected by [`next_occurrence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub interval: i64,
    pub unit: RecurrenceUnit,
}

impl RecurrenceRule {
    /// Reject rules that can never move forward.
    pub fn validate(&self) -> CaliTaskResult<()> {
        if self.interval <= 0 {
            return Err(CaliTaskError::DegenerateRecurrence {
                interval: self.interval,
            });
        }
        Ok(())
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interval == 1 {
            write!(f, "every {}", self.unit.as_str())
        } else {
            write!(f, "every {} {}s", self.interval, self.unit.as_str())
        }
    }
}

/// Parse an RRULE value such as `FREQ=WEEKLY;INTERVAL=2`.
///
/// Returns `None` when FREQ is missing or not one of DAILY, WEEKLY, MONTHLY,
/// YEARLY, even if an INTERVAL is present. INTERVAL defaults to 1 when absent
/// or not a number.
pub fn parse_rule(raw: &str) -> Option<RecurrenceRule> {
    let mut freq = None;
    let mut interval = None;

    for part in raw.split(';') {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_uppercase().as_str() {
            "FREQ" => freq = Some(value),
            "INTERVAL" => interval = Some(value),
            _ => {}
        }
    }

    let unit = RecurrenceUnit::from_freq(freq?)?;
    let interval = interval
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(1);

    Some(RecurrenceRule { interval, unit })
}

/// Project the first occurrence of `start` repeating by `rule` that is not
/// before `now`.
///
/// Each step is applied to the previous result. Day and week steps add whole
/// days; month and year steps move the calendar month and let a missing
/// day-of-month roll into the following month (Jan 31 + 1 month = Mar 3 in a
/// common year). A `start` already at or after `now` comes back unchanged.
pub fn next_occurrence(
    start: Instant,
    rule: &RecurrenceRule,
    now: DateTime<Utc>,
) -> CaliTaskResult<Instant> {
    rule.validate()?;

    let mut next = start;
    let mut steps = 0;

    while next.is_before(now) {
        if steps == MAX_ADVANCE_STEPS {
            return Err(CaliTaskError::RecurrenceOverflow(start.to_string()));
        }
        next = advance(next, rule)
            .ok_or_else(|| CaliTaskError::RecurrenceOverflow(start.to_string()))?;
        steps += 1;
    }

    Ok(next)
}

fn advance(instant: Instant, rule: &RecurrenceRule) -> Option<Instant> {
    match instant {
        Instant::Utc(dt) => step_date_time(dt.naive_utc(), rule).map(|n| Instant::Utc(n.and_utc())),
        Instant::Floating(dt) => step_date_time(dt, rule).map(Instant::Floating),
        Instant::AllDay(d) => step_date(d, rule).map(Instant::AllDay),
    }
}

fn step_date_time(dt: NaiveDateTime, rule: &RecurrenceRule) -> Option<NaiveDateTime> {
    Some(step_date(dt.date(), rule)?.and_time(dt.time()))
}

fn step_date(date: NaiveDate, rule: &RecurrenceRule) -> Option<NaiveDate> {
    let n = u64::try_from(rule.interval).ok()?;

    match rule.unit {
        RecurrenceUnit::Day => date.checked_add_days(Days::new(n)),
        RecurrenceUnit::Week => date.checked_add_days(Days::new(n.checked_mul(7)?)),
        RecurrenceUnit::Month => add_months_rolling(date, n),
        RecurrenceUnit::Year => add_months_rolling(date, n.checked_mul(12)?),
    }
}

fn add_months_rolling(date: NaiveDate, months: u64) -> Option<NaiveDate> {
    let months = Months::new(u32::try_from(months).ok()?);
    let first_of_target = date.with_day(1)?.checked_add_months(months)?;
    first_of_target.checked_add_days(Days::new(u64::from(date.day0())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn floating(y: i32, m: u32, d: u32, h: u32) -> Instant {
        Instant::Floating(date(y, m, d).and_hms_opt(h, 0, 0).unwrap())
    }

    fn rule(interval: i64, unit: RecurrenceUnit) -> RecurrenceRule {
        RecurrenceRule { interval, unit }
    }

    #[test]
    fn test_parse_rule_weekly_with_interval() {
        assert_eq!(
            parse_rule("FREQ=WEEKLY;INTERVAL=2"),
            Some(rule(2, RecurrenceUnit::Week))
        );
    }

    #[test]
    fn test_parse_rule_frequency_is_case_insensitive() {
        assert_eq!(parse_rule("FREQ=daily"), Some(rule(1, RecurrenceUnit::Day)));
        assert_eq!(parse_rule("FREQ=Monthly"), Some(rule(1, RecurrenceUnit::Month)));
        assert_eq!(parse_rule("FREQ=YEARLY"), Some(rule(1, RecurrenceUnit::Year)));
    }

    #[test]
    fn test_parse_rule_interval_defaults_to_one() {
        assert_eq!(parse_rule("FREQ=DAILY"), Some(rule(1, RecurrenceUnit::Day)));
        assert_eq!(
            parse_rule("FREQ=DAILY;INTERVAL=often"),
            Some(rule(1, RecurrenceUnit::Day))
        );
    }

    #[test]
    fn test_parse_rule_ignores_other_keys() {
        assert_eq!(
            parse_rule("FREQ=WEEKLY;BYDAY=MO,WE;COUNT=10;INTERVAL=3"),
            Some(rule(3, RecurrenceUnit::Week))
        );
    }

    #[test]
    fn test_parse_rule_unrecognized_frequency() {
        assert_eq!(parse_rule("FREQ=HOURLY;INTERVAL=2"), None);
        assert_eq!(parse_rule("INTERVAL=2"), None);
        assert_eq!(parse_rule(""), None);
    }

    #[test]
    fn test_parse_rule_keeps_degenerate_interval() {
        assert_eq!(
            parse_rule("FREQ=DAILY;INTERVAL=0"),
            Some(rule(0, RecurrenceUnit::Day))
        );
        assert_eq!(
            parse_rule("FREQ=DAILY;INTERVAL=-3"),
            Some(rule(-3, RecurrenceUnit::Day))
        );
    }

    #[test]
    fn test_biweekly_floating_lands_after_reference() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let start = floating(2025, 3, 10, 9);

        let next = next_occurrence(start, &rule(2, RecurrenceUnit::Week), now).unwrap();

        assert_eq!(next, floating(2025, 4, 7, 9));
    }

    #[test]
    fn test_future_start_is_returned_unchanged() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let start = Instant::Utc(Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap());

        assert_eq!(
            next_occurrence(start, &rule(1, RecurrenceUnit::Day), now).unwrap(),
            start
        );
    }

    #[test]
    fn test_reapplying_is_idempotent() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 10, 30, 0).unwrap();
        let daily = rule(3, RecurrenceUnit::Day);
        let start = Instant::Utc(Utc.with_ymd_and_hms(2024, 12, 25, 10, 0, 0).unwrap());

        let once = next_occurrence(start, &daily, now).unwrap();
        let twice = next_occurrence(once, &daily, now).unwrap();

        assert_eq!(once, twice);
        assert!(!once.is_before(now));
    }

    #[test]
    fn test_all_day_dated_today_is_not_advanced() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 23, 0, 0).unwrap();
        let start = Instant::AllDay(date(2025, 3, 1));

        let next = next_occurrence(start, &rule(1, RecurrenceUnit::Month), now).unwrap();

        assert_eq!(next, Instant::AllDay(date(2025, 4, 1)));
    }

    #[test]
    fn test_month_step_rolls_over_short_months() {
        let now = Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap();
        let start = Instant::AllDay(date(2025, 1, 31));

        let next = next_occurrence(start, &rule(1, RecurrenceUnit::Month), now).unwrap();

        assert_eq!(next, Instant::AllDay(date(2025, 3, 3)));
    }

    #[test]
    fn test_year_step_from_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let start = Instant::AllDay(date(2024, 2, 29));

        let next = next_occurrence(start, &rule(1, RecurrenceUnit::Year), now).unwrap();

        assert_eq!(next, Instant::AllDay(date(2025, 3, 1)));
    }

    #[test]
    fn test_utc_keeps_time_of_day() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap();
        let start = Instant::Utc(Utc.with_ymd_and_hms(2025, 3, 31, 18, 45, 0).unwrap());

        let next = next_occurrence(start, &rule(1, RecurrenceUnit::Day), now).unwrap();

        assert_eq!(
            next,
            Instant::Utc(Utc.with_ymd_and_hms(2025, 4, 1, 18, 45, 0).unwrap())
        );
    }

    #[test]
    fn test_long_gap_terminates() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let start = Instant::AllDay(date(1900, 1, 1));

        let next = next_occurrence(start, &rule(1, RecurrenceUnit::Day), now).unwrap();

        assert_eq!(next, Instant::AllDay(date(2025, 4, 1)));
    }

    #[test]
    fn test_zero_and_negative_interval_are_errors() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let start = floating(2025, 3, 10, 9);

        for interval in [0, -1] {
            let err = next_occurrence(start, &rule(interval, RecurrenceUnit::Week), now)
                .unwrap_err();
            assert!(matches!(
                err,
                CaliTaskError::DegenerateRecurrence { interval: i } if i == interval
            ));
        }
    }

    #[test]
    fn test_degenerate_interval_rejected_even_when_start_is_future() {
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let start = floating(2026, 1, 1, 9);

        assert!(next_occurrence(start, &rule(0, RecurrenceUnit::Day), now).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(rule(1, RecurrenceUnit::Week).to_string(), "every week");
        assert_eq!(rule(3, RecurrenceUnit::Month).to_string(), "every 3 months");
    }

    #[test]
    fn test_step_cap_is_overflow() {
        let start = Instant::AllDay(date(0, 1, 1));
        let now = Utc.with_ymd_and_hms(2900, 1, 1, 0, 0, 0).unwrap();

        assert!(matches!(
            next_occurrence(start, &rule(1, RecurrenceUnit::Day), now),
            Err(CaliTaskError::RecurrenceOverflow(_))
        ));
    }

    #[test]
    fn test_date_range_end_is_overflow() {
        let start = Instant::AllDay(NaiveDate::MAX.pred_opt().unwrap());

        assert!(matches!(
            next_occurrence(start, &rule(1, RecurrenceUnit::Month), DateTime::<Utc>::MAX_UTC),
            Err(CaliTaskError::RecurrenceOverflow(_))
        ));
    }
}
