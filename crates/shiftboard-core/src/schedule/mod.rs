//! Monthly schedule view-model.
//!
//! `build_schedule` turns the flat shift list into one row per date for the
//! selected month. Rows are plain data so the grouping and formatting can be
//! tested without a terminal; the TUI and the HTML export both render from
//! the same `ScheduleTable`.

pub mod html;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::calendar::{weekday_abbrev, WEEKDAY_PLACEHOLDER};
use crate::models::{MonthCursor, ReminderKind, Shift};
use crate::utils::{compare_sv, format_phone};

pub use html::render_html;

/// Shown in place of a missing name
pub const NAME_PLACEHOLDER: &str = "—";

/// Shown in place of an unlit reminder badge
pub const BADGE_PLACEHOLDER: &str = "—";

/// Shown on the phone button when a person has no number
pub const MISSING_PHONE_LABEL: &str = "Saknar nr";

/// One person on a schedule row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonEntry {
    pub name: String,
    /// `Plats <berth>`, when the shift has a berth
    pub berth_label: Option<String>,
    /// Trimmed raw number, used for copying
    pub phone: Option<String>,
    pub phone_label: String,
}

impl PersonEntry {
    fn from_shift(shift: &Shift) -> Self {
        let first = shift.first_name.as_deref().unwrap_or("");
        let last = shift.last_name.as_deref().unwrap_or("");
        let full = format!("{} {}", first, last);
        let name = match full.trim() {
            "" => NAME_PLACEHOLDER.to_string(),
            trimmed => trimmed.to_string(),
        };

        let berth_label = shift
            .berth
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(|b| format!("Plats {}", b));

        let phone = shift
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        let phone_label = phone
            .as_deref()
            .map(format_phone)
            .unwrap_or_else(|| MISSING_PHONE_LABEL.to_string());

        Self {
            name,
            berth_label,
            phone,
            phone_label,
        }
    }
}

/// All people working on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub date: String,
    /// Day of month, `None` when the date's day part is not a number
    pub day: Option<u32>,
    pub weekday: String,
    pub reminder_14d: bool,
    pub reminder_1d: bool,
    pub people: Vec<PersonEntry>,
}

impl ScheduleRow {
    /// `shifts` must all share `date` and already be sorted
    fn from_group(date: String, shifts: &[&Shift]) -> Self {
        let day = date.get(8..10).and_then(|d| d.parse::<u32>().ok());

        let weekday = shifts
            .first()
            .and_then(|s| s.weekday.as_deref())
            .and_then(weekday_abbrev)
            .unwrap_or(WEEKDAY_PLACEHOLDER)
            .to_string();

        let reminder_14d = shifts
            .iter()
            .any(|s| s.has_reminder(ReminderKind::TwoWeeksBefore));
        let reminder_1d = shifts
            .iter()
            .any(|s| s.has_reminder(ReminderKind::OneDayBefore));

        let people = shifts.iter().map(|s| PersonEntry::from_shift(s)).collect();

        Self {
            date,
            day,
            weekday,
            reminder_14d,
            reminder_1d,
            people,
        }
    }
}

/// The schedule for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTable {
    pub cursor: MonthCursor,
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Summary line shown under the table, only when there are rows
    pub fn meta(&self) -> Option<String> {
        if self.rows.is_empty() {
            return None;
        }
        Some(format!(
            "Visar {} datum för {}. (Om flera personer har samma datum visas de tillsammans.)",
            self.rows.len(),
            self.cursor
        ))
    }

    /// Informational line shown instead of rows for an empty month
    pub fn empty_message(&self) -> String {
        format!("Inga pass hittades för {}.", self.cursor)
    }
}

/// Group `shifts` of the cursor's month into one row per date.
///
/// Dates ascend; people within a date are sorted by last name with Swedish
/// collation. Shifts without a date, or dated outside the month, are left
/// out.
pub fn build_schedule(shifts: &[Shift], cursor: MonthCursor) -> ScheduleTable {
    let prefix = cursor.prefix();

    let mut by_date: BTreeMap<&str, Vec<&Shift>> = BTreeMap::new();
    for shift in shifts {
        let Some(date) = shift.date.as_deref() else {
            continue;
        };
        if date.starts_with(&prefix) {
            by_date.entry(date).or_default().push(shift);
        }
    }

    let rows = by_date
        .into_iter()
        .map(|(date, mut group)| {
            group.sort_by(|a, b| compare_sv(a.last_name(), b.last_name()));
            ScheduleRow::from_group(date.to_string(), &group)
        })
        .collect();

    ScheduleTable { cursor, rows }
}

/// What the schedule area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleView {
    Rows(ScheduleTable),
    /// No shifts in the month; carries the informational line
    Empty(String),
    /// Loading shifts failed; carries `Fel: <message>`
    Error(String),
}

impl ScheduleView {
    pub fn from_table(table: ScheduleTable) -> Self {
        if table.is_empty() {
            ScheduleView::Empty(table.empty_message())
        } else {
            ScheduleView::Rows(table)
        }
    }

    pub fn meta(&self) -> Option<String> {
        match self {
            ScheduleView::Rows(table) => table.meta(),
            ScheduleView::Empty(_) | ScheduleView::Error(_) => None,
        }
    }
}
