//! Planning an import: calendar feed in, todo payloads out.
//!
//! Planning is pure and synchronous. Sending the payloads to the storage API
//! is left to the caller, which reads the clock once and passes it in so that
//! every event of a run is judged against the same instant.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::CalitaskConfig;
use crate::error::{CaliTaskError, CaliTaskResult};
use crate::event::{ParsedEvent, UNTITLED_EVENT};
use crate::ics::parse_feed;
use crate::recurrence::{RecurrenceUnit, next_occurrence};
use crate::relevance::{is_relevant, today_for};
use crate::wire::format_strict;

/// Project title used when the feed's file name has nothing left after the extension.
pub const DEFAULT_PROJECT_TITLE: &str = "Imported Calendar";

const FEED_EXTENSIONS: &[&str] = &[".ics", ".calendar"];

/// Body of `POST /api/todo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub project_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_unit: Option<RecurrenceUnit>,
    /// Feed UID, lets the storage side recognize re-imported events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub project_id: i64,
    pub untitled_title: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            project_id: 1,
            untitled_title: UNTITLED_EVENT.to_string(),
        }
    }
}

impl ImportOptions {
    pub fn from_config(config: &CalitaskConfig, project_id: i64) -> Self {
        ImportOptions {
            project_id,
            untitled_title: config.untitled_title.clone(),
        }
    }
}

/// An event that passed the relevance filter but could not become a todo.
#[derive(Debug)]
pub struct RejectedEvent {
    pub title: String,
    pub error: CaliTaskError,
}

#[derive(Debug, Default)]
pub struct ImportPlan {
    pub todos: Vec<NewTodo>,
    pub rejected: Vec<RejectedEvent>,
    /// Events removed by the relevance filter.
    pub dropped: usize,
}

impl ImportPlan {
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Point every planned todo at `project_id`, once the project is known.
    pub fn assign_project(&mut self, project_id: i64) {
        for todo in &mut self.todos {
            todo.project_id = project_id;
        }
    }
}

/// Parse `feed`, filter it against `now` and build one todo per surviving event.
pub fn plan_import(feed: &str, now: DateTime<Utc>, options: &ImportOptions) -> ImportPlan {
    let today = today_for(now);
    let mut plan = ImportPlan::default();

    for event in parse_feed(feed).into_iter().map(ParsedEvent::from_raw) {
        let title = event.title(&options.untitled_title).to_string();

        if !is_relevant(&event, now, today) {
            debug!("Skipping past event '{}'", title);
            plan.dropped += 1;
            continue;
        }

        match todo_for(&event, now, options) {
            Ok(todo) => plan.todos.push(todo),
            Err(error) => {
                warn!("Rejecting event '{}': {}", title, error);
                plan.rejected.push(RejectedEvent { title, error });
            }
        }
    }

    debug!(
        "Planned {} todos ({} dropped, {} rejected)",
        plan.todos.len(),
        plan.dropped,
        plan.rejected.len()
    );

    plan
}

/// Build the todo payload for one event.
///
/// Recurring events are due on their next occurrence not before `now`;
/// floating and all-day instants are sent with their calendar fields as UTC.
pub fn todo_for(
    event: &ParsedEvent,
    now: DateTime<Utc>,
    options: &ImportOptions,
) -> CaliTaskResult<NewTodo> {
    if let Some(rule) = &event.recurrence {
        rule.validate()?;
    }

    let due = match (event.due, &event.recurrence) {
        (Some(start), Some(rule)) => Some(next_occurrence(start, rule, now)?),
        (due, _) => due,
    };

    Ok(NewTodo {
        title: event.title(&options.untitled_title).to_string(),
        completed: false,
        project_id: options.project_id,
        due_date: due.map(|instant| format_strict(instant.resolve_as_utc())),
        recurrence_interval: event.recurrence.map(|rule| rule.interval),
        recurrence_unit: event.recurrence.map(|rule| rule.unit),
        uid: event.uid.clone(),
    })
}

/// Project title for a feed file: the file name without its `.ics` or
/// `.calendar` extension.
pub fn project_title_for(file_name: &str) -> String {
    let lower = file_name.to_ascii_lowercase();
    let stem = FEED_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map(|ext| &file_name[..file_name.len() - ext.len()])
        .unwrap_or(file_name);

    if stem.is_empty() {
        DEFAULT_PROJECT_TITLE.to_string()
    } else {
        stem.to_string()
    }
}
