//! Data models for the dashboard.
//!
//! - `Shift`, `Reminder`: what `GET /shifts` returns
//! - `MonthCursor`: the selected year and month
//! - `View`: the three dashboard views

pub mod calendar;
pub mod shift;
pub mod view;

pub use calendar::{month_name, MonthCursor, MONTHS_SV};
pub use shift::{Reminder, ReminderKind, Shift};
pub use view::View;
