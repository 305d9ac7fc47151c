//! Block scanning over unfolded feed lines.

use log::debug;

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

/// Field values captured from one `BEGIN:VEVENT` / `END:VEVENT` block,
/// still in their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub summary: Option<String>,
    pub uid: Option<String>,
    /// Everything after the first colon of the DTSTART line.
    pub raw_date: Option<String>,
    /// The RRULE value, e.g. `FREQ=WEEKLY;INTERVAL=2`.
    pub raw_recurrence: Option<String>,
}

enum ScanState {
    Outside,
    /// `nested` counts open sub-components (VALARM etc.) whose lines are skipped.
    Inside { event: RawEvent, nested: usize },
}

/// Join folded continuation lines: a line break followed by a single space or
/// tab is removed together with that whitespace character.
pub fn unfold(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut unfolded = String::with_capacity(content.len());
    let mut copied_until = 0;
    let mut i = 0;

    while i < bytes.len() {
        let break_len = match bytes[i] {
            b'\n' => 1,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => 2,
            _ => 0,
        };

        if break_len > 0 && matches!(bytes.get(i + break_len), Some(b' ' | b'\t')) {
            unfolded.push_str(&content[copied_until..i]);
            i += break_len + 1;
            copied_until = i;
        } else {
            i += break_len.max(1);
        }
    }

    unfolded.push_str(&content[copied_until..]);
    unfolded
}

/// Parse feed text into raw event records, in source order.
///
/// Never fails: blocks that are opened but not closed are dropped, and lines
/// that are not understood are ignored.
pub fn parse_feed(content: &str) -> Vec<RawEvent> {
    let unfolded = unfold(content);
    let mut events = Vec::new();

    let state = unfolded
        .lines()
        .fold(ScanState::Outside, |state, line| scan_line(state, line, &mut events));

    if let ScanState::Inside { event, .. } = state {
        debug!(
            "Discarding unterminated event block (summary: {:?})",
            event.summary
        );
    }

    events
}

fn scan_line(state: ScanState, line: &str, events: &mut Vec<RawEvent>) -> ScanState {
    if line == BEGIN_EVENT {
        return ScanState::Inside {
            event: RawEvent::default(),
            nested: 0,
        };
    }

    let ScanState::Inside { event, nested } = state else {
        return ScanState::Outside;
    };

    if line == END_EVENT {
        events.push(event);
        return ScanState::Outside;
    }

    if line.starts_with("BEGIN:") {
        return ScanState::Inside {
            event,
            nested: nested + 1,
        };
    }

    if nested > 0 {
        let nested = if line.starts_with("END:") { nested - 1 } else { nested };
        return ScanState::Inside { event, nested };
    }

    ScanState::Inside {
        event: apply_field(event, line),
        nested,
    }
}

fn apply_field(mut event: RawEvent, line: &str) -> RawEvent {
    if let Some(rest) = line.strip_prefix("SUMMARY:") {
        event.summary = Some(rest.trim().to_string());
    } else if line.starts_with("DTSTART") {
        // DTSTART may carry parameters (e.g. ;VALUE=DATE) before its colon
        if let Some((_, value)) = line.split_once(':') {
            let value = value.trim();
            if !value.is_empty() {
                event.raw_date = Some(value.to_string());
            }
        }
    } else if let Some(rest) = line.strip_prefix("RRULE:") {
        event.raw_recurrence = Some(rest.trim().to_string());
    } else if let Some(rest) = line.strip_prefix("UID:") {
        event.uid = Some(rest.trim().to_string());
    }

    event
}
