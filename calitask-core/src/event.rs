//! Events as they come out of a calendar feed, ready to become todos.

use serde::{Deserialize, Serialize};

use crate::ics::{RawEvent, classify};
use crate::instant::Instant;
use crate::recurrence::{RecurrenceRule, parse_rule};

/// Title given to events that have no SUMMARY.
pub const UNTITLED_EVENT: &str = "Untitled event";

/// A classified calendar event.
///
/// A missing summary is a data-quality defect of the feed, not a parse failure,
/// so it is kept optional here and defaulted when a todo is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub summary: Option<String>,
    pub uid: Option<String>,
    pub due: Option<Instant>,
    pub recurrence: Option<RecurrenceRule>,
}

impl ParsedEvent {
    pub fn from_raw(raw: RawEvent) -> Self {
        ParsedEvent {
            due: raw.raw_date.as_deref().and_then(classify),
            recurrence: raw.raw_recurrence.as_deref().and_then(parse_rule),
            summary: raw.summary,
            uid: raw.uid,
        }
    }

    /// The summary, or `placeholder` when the feed did not provide one.
    pub fn title<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(placeholder)
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

impl From<RawEvent> for ParsedEvent {
    fn from(raw: RawEvent) -> Self {
        ParsedEvent::from_raw(raw)
    }
}
