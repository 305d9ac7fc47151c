//! Decides which feed events are still worth turning into todos.

use chrono::{DateTime, NaiveDate, Utc};

use crate::event::ParsedEvent;
use crate::instant::Instant;

/// The calendar day `now` falls on, in UTC.
pub fn today_for(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Whether `event` should be surfaced at import time.
///
/// Recurring events and undated events are always kept. All-day events are
/// kept from `today` on; timed events from `now` on, at second granularity.
pub fn is_relevant(event: &ParsedEvent, now: DateTime<Utc>, today: NaiveDate) -> bool {
    if event.is_recurring() {
        return true;
    }

    match event.due {
        None => true,
        Some(Instant::AllDay(date)) => date >= today,
        Some(instant) => !instant.is_before(now),
    }
}
