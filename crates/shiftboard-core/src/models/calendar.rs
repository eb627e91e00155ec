use std::fmt;

use chrono::{Datelike, Local};
use serde::Serialize;

pub const MONTHS_SV: [&str; 12] = [
    "Januari", "Februari", "Mars", "April", "Maj", "Juni", "Juli", "Augusti", "September",
    "Oktober", "November", "December",
];

/// Placeholder for weekdays that are missing or not in the lookup table
pub const WEEKDAY_PLACEHOLDER: &str = "—";

/// Swedish month name for a 0-based month index
pub fn month_name(month: u32) -> &'static str {
    MONTHS_SV.get(month as usize).copied().unwrap_or("")
}

/// Map a weekday as the backend spells it (English or Swedish, abbreviated
/// or full) to the Swedish three-letter abbreviation.
pub fn weekday_abbrev(raw: &str) -> Option<&'static str> {
    let abbrev = match raw.trim() {
        "Mon" | "Monday" | "Mån" | "Man" | "Måndag" => "Mån",
        "Tue" | "Tuesday" | "Tis" | "Tisdag" => "Tis",
        "Wed" | "Wednesday" | "Ons" | "Onsdag" => "Ons",
        "Thu" | "Thursday" | "Tor" | "Torsdag" => "Tor",
        "Fri" | "Friday" | "Fre" | "Fredag" => "Fre",
        "Sat" | "Saturday" | "Lör" | "Lördag" => "Lör",
        "Sun" | "Sunday" | "Sön" | "Söndag" => "Sön",
        _ => return None,
    };
    Some(abbrev)
}

/// A selected calendar month. `month` is 0-based and always in `0..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Returns `None` when `month` is outside `0..=11`
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (month < 12).then_some(Self { year, month })
    }

    /// The current month of `year`
    pub fn current_in(year: i32) -> Self {
        Self {
            year,
            month: Local::now().month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Move by `delta` months, wrapping into adjacent years
    pub fn step(self, delta: i32) -> Self {
        let total = self.year as i64 * 12 + self.month as i64 + delta as i64;
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32,
        }
    }

    pub fn with_month(self, month: u32) -> Option<Self> {
        Self::new(self.year, month)
    }

    pub fn with_year(self, year: i32) -> Self {
        Self { year, ..self }
    }

    /// Date prefix shared by every day in this month, e.g. `2026-03-`
    pub fn prefix(&self) -> String {
        format!("{}-{:02}-", self.year, self.month + 1)
    }

    pub fn label(&self) -> &'static str {
        month_name(self.month)
    }

    /// Parse `YYYY-MM` (1-based month)
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        Self::new(year, month.checked_sub(1)?)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_forward_wraps_year() {
        let dec = MonthCursor::new(2026, 11).unwrap();
        assert_eq!(dec.step(1), MonthCursor::new(2027, 0).unwrap());
    }

    #[test]
    fn test_step_backward_wraps_year() {
        let jan = MonthCursor::new(2026, 0).unwrap();
        assert_eq!(jan.step(-1), MonthCursor::new(2025, 11).unwrap());
    }

    #[test]
    fn test_step_large_deltas() {
        let mar = MonthCursor::new(2026, 2).unwrap();
        assert_eq!(mar.step(25), MonthCursor::new(2028, 3).unwrap());
        assert_eq!(mar.step(-27), MonthCursor::new(2023, 11).unwrap());
        assert_eq!(mar.step(0), mar);
    }

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(MonthCursor::new(2026, 12).is_none());
        assert!(MonthCursor::new(2026, 11).is_some());
    }

    #[test]
    fn test_prefix_is_zero_padded() {
        assert_eq!(MonthCursor::new(2026, 2).unwrap().prefix(), "2026-03-");
        assert_eq!(MonthCursor::new(2026, 11).unwrap().prefix(), "2026-12-");
    }

    #[test]
    fn test_label_and_display() {
        let cursor = MonthCursor::new(2026, 4).unwrap();
        assert_eq!(cursor.label(), "Maj");
        assert_eq!(cursor.to_string(), "Maj 2026");
    }

    #[test]
    fn test_parse() {
        assert_eq!(MonthCursor::parse("2026-03"), MonthCursor::new(2026, 2));
        assert_eq!(MonthCursor::parse("2026-13"), None);
        assert_eq!(MonthCursor::parse("2026-00"), None);
        assert_eq!(MonthCursor::parse("mars"), None);
    }

    #[test]
    fn test_weekday_abbrev() {
        assert_eq!(weekday_abbrev("Wed"), Some("Ons"));
        assert_eq!(weekday_abbrev("Lördag"), Some("Lör"));
        assert_eq!(weekday_abbrev("Sunday"), Some("Sön"));
        assert_eq!(weekday_abbrev("Mån"), Some("Mån"));
        assert_eq!(weekday_abbrev("Blursday"), None);
        assert_eq!(weekday_abbrev(""), None);
    }

    #[test]
    fn test_month_name_out_of_range() {
        assert_eq!(month_name(0), "Januari");
        assert_eq!(month_name(12), "");
    }
}
