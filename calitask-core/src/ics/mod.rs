//! Calendar feed reading.
//!
//! Covers the narrow subset calitask imports: VEVENT blocks and their
//! SUMMARY, UID, DTSTART and RRULE lines. Time zones, EXDATE and alarms are
//! not interpreted.

mod date;
mod parse;

pub use date::classify;
pub use parse::{RawEvent, parse_feed, unfold};
