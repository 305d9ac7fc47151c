//! Core engine for calitask.
//!
//! Turns calendar feeds into todo payloads:
//! - `ics` scans VEVENT blocks and classifies their DTSTART values
//! - `recurrence` projects repeating events onto their next occurrence
//! - `relevance` drops events that are already over
//! - `wire` owns the strict due-date format sent to the storage API
//! - `import` ties the above into a single planning step

pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod import;
pub mod instant;
pub mod recurrence;
pub mod relevance;
pub mod wire;

pub use config::CalitaskConfig;
pub use error::{CaliTaskError, CaliTaskResult};
pub use event::ParsedEvent;
pub use import::{ImportOptions, ImportPlan, NewTodo, plan_import, project_title_for};
pub use instant::{Instant, InstantKind};
pub use recurrence::{RecurrenceRule, RecurrenceUnit};
