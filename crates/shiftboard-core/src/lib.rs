//! Core library for shiftboard.
//!
//! Everything here is free of terminal concerns so it can be unit-tested
//! without a UI:
//!
//! - `api`: HTTP client for the scheduling backend
//! - `models`: shifts, reminders, views and the month cursor
//! - `schedule`: the monthly schedule view-model and HTML export
//! - `state`: the dashboard controller state
//! - `requests`: per-slot request tokens for discarding stale results
//! - `config` / `session`: configuration file and login flag
//! - `utils`: formatting and Swedish collation helpers

pub mod api;
pub mod config;
pub mod models;
pub mod requests;
pub mod schedule;
pub mod session;
pub mod state;
pub mod utils;

pub use api::{ApiClient, ApiError, LogQuery, Payload};
pub use config::Config;
pub use models::{MonthCursor, Reminder, ReminderKind, Shift, View};
pub use requests::{RequestToken, RequestTracker, Slot};
pub use schedule::{build_schedule, ScheduleTable, ScheduleView};
pub use session::Session;
pub use state::{Dashboard, LogKind, LogRequest, Request, Status, StatusKind};
