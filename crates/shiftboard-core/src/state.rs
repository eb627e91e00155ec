//! Dashboard controller state.
//!
//! `Dashboard` owns everything the three views display: the active view,
//! the month cursor, the shift cache and the upload and log panels. Its
//! handlers never touch the network. Operations that need a request return
//! a `Request` for the caller to dispatch, and the caller feeds the outcome
//! back through the matching `*_loaded` / `*_failed` handler.

use std::fmt::Display;
use std::path::PathBuf;

use tracing::debug;

use crate::api::{LogQuery, Payload};
use crate::config::DEFAULT_LOG_LIMIT;
use crate::models::{MonthCursor, Shift, View};
use crate::requests::Slot;
use crate::schedule::{build_schedule, ScheduleTable, ScheduleView};

// ============================================================================
// Status line
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ok,
    Error,
}

/// Transient status line of the upload and logs panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Ok,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Which log batch to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Latest,
    Errors,
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRequest {
    Latest,
    Errors,
    Filtered(LogQuery),
}

/// Network work the dashboard wants done
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    LoadShifts,
    Upload(PathBuf),
    Logs(LogRequest),
}

impl Request {
    /// The UI slot this request's result is shown in
    pub fn slot(&self) -> Slot {
        match self {
            Request::LoadShifts => Slot::Shifts,
            Request::Upload(_) => Slot::Upload,
            Request::Logs(_) => Slot::Logs,
        }
    }
}

// ============================================================================
// Panels
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct UploadPanel {
    /// Path of the spreadsheet to upload, as typed
    pub path_input: String,
    pub status: Option<Status>,
    pub response: Option<Payload>,
}

#[derive(Debug, Clone, Default)]
pub struct LogsPanel {
    /// `YYYY-MM-DD` filter, as typed
    pub date_input: String,
    /// Entry limit, as typed
    pub limit_input: String,
    pub status: Option<Status>,
    pub output: Option<Payload>,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone)]
pub struct Dashboard {
    view: View,
    cursor: MonthCursor,
    shifts: Vec<Shift>,
    shifts_error: Option<String>,
    log_limit: u32,
    pub upload: UploadPanel,
    pub logs: LogsPanel,
}

impl Dashboard {
    /// Open on the schedule view at the current month of `year`
    pub fn new(year: i32, log_limit: u32) -> Self {
        Self::with_cursor(MonthCursor::current_in(year), log_limit)
    }

    pub fn with_cursor(cursor: MonthCursor, log_limit: u32) -> Self {
        let log_limit = if log_limit == 0 {
            DEFAULT_LOG_LIMIT
        } else {
            log_limit
        };
        Self {
            view: View::Schedule,
            cursor,
            shifts: Vec::new(),
            shifts_error: None,
            log_limit,
            upload: UploadPanel::default(),
            logs: LogsPanel {
                limit_input: log_limit.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    /// Switch view. Entering the logs view asks for the latest batch.
    pub fn set_view(&mut self, view: View) -> Option<Request> {
        self.view = view;
        (view == View::Logs).then(|| self.request_logs(LogKind::Latest))
    }

    /// Move the cursor. A pending load error gives way to the cached rows.
    pub fn step_month(&mut self, delta: i32) {
        self.cursor = self.cursor.step(delta);
        self.shifts_error = None;
    }

    /// Jump to a 0-based month in the current year. Out of range is ignored.
    pub fn select_month(&mut self, month: u32) -> bool {
        match self.cursor.with_month(month) {
            Some(cursor) => {
                self.cursor = cursor;
                self.shifts_error = None;
                true
            }
            None => false,
        }
    }

    /// The month table for the current cursor
    pub fn schedule_table(&self) -> ScheduleTable {
        build_schedule(&self.shifts, self.cursor)
    }

    /// What the schedule area shows, derived fresh from state
    pub fn schedule_view(&self) -> ScheduleView {
        match &self.shifts_error {
            Some(message) => ScheduleView::Error(format!("Fel: {}", message)),
            None => ScheduleView::from_table(self.schedule_table()),
        }
    }

    /// Replace the shift cache. The cursor year follows the first shift.
    pub fn shifts_loaded(&mut self, payload: &Payload) {
        self.shifts = Shift::list_from_payload(payload);
        self.shifts_error = None;

        if let Some(year) = self.shifts.first().and_then(Shift::year).filter(|y| *y != 0) {
            self.cursor = self.cursor.with_year(year);
        }
        debug!(count = self.shifts.len(), year = self.cursor.year(), "Shifts loaded");
    }

    /// Show the error row. The cache keeps the last good load.
    pub fn shifts_failed(&mut self, error: impl Display) {
        self.shifts_error = Some(error.to_string());
    }

    /// Validate the upload path and start an upload
    pub fn submit_upload(&mut self) -> Option<Request> {
        let path = self.upload.path_input.trim();
        if path.is_empty() {
            self.upload.status = Some(Status::error("Välj en fil först."));
            return None;
        }

        let path = PathBuf::from(path);
        if !path.is_file() {
            self.upload.status = Some(Status::error(format!(
                "Filen finns inte: {}",
                path.display()
            )));
            return None;
        }

        self.upload.status = Some(Status::ok("Laddar upp..."));
        self.upload.response = None;
        Some(Request::Upload(path))
    }

    /// Show the backend's answer and ask for a shift reload
    pub fn upload_succeeded(&mut self, payload: Payload) -> Request {
        self.upload.status = Some(Status::ok("Fil uppladdad och tolkad ✅"));
        self.upload.response = Some(payload);
        Request::LoadShifts
    }

    pub fn upload_failed(&mut self, error: impl Display) {
        self.upload.status = Some(Status::error(format!("Fel vid uppladdning: {}", error)));
    }

    pub fn request_logs(&mut self, kind: LogKind) -> Request {
        let (message, request) = match kind {
            LogKind::Latest => ("Hämtar senaste...", LogRequest::Latest),
            LogKind::Errors => ("Hämtar fel-loggar...", LogRequest::Errors),
            LogKind::Filtered => ("Filtrerar...", LogRequest::Filtered(self.log_query())),
        };
        self.logs.status = Some(Status::ok(message));
        self.logs.output = None;
        Request::Logs(request)
    }

    /// Filter built from the logs panel fields
    fn log_query(&self) -> LogQuery {
        let date = self.logs.date_input.trim();
        let limit = self
            .logs
            .limit_input
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|l| *l > 0)
            .unwrap_or(self.log_limit);

        LogQuery {
            date: (!date.is_empty()).then(|| date.to_string()),
            limit: Some(limit),
        }
    }

    pub fn logs_loaded(&mut self, payload: Payload) {
        self.logs.status = Some(Status::ok("OK"));
        self.logs.output = Some(payload);
    }

    pub fn logs_failed(&mut self, error: impl Display) {
        self.logs.status = Some(Status::error(format!("Fel: {}", error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dashboard() -> Dashboard {
        Dashboard::with_cursor(MonthCursor::new(2026, 2).unwrap(), DEFAULT_LOG_LIMIT)
    }

    fn scratch_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"PK\x03\x04").unwrap();
        path
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    #[test]
    fn test_starts_on_schedule() {
        let dash = dashboard();
        assert_eq!(dash.view(), View::Schedule);
        assert_eq!(dash.logs.limit_input, "50");
    }

    #[test]
    fn test_entering_logs_requests_latest() {
        let mut dash = dashboard();
        assert_eq!(dash.set_view(View::Upload), None);
        assert_eq!(
            dash.set_view(View::Logs),
            Some(Request::Logs(LogRequest::Latest))
        );
        assert_eq!(dash.view(), View::Logs);
        assert_eq!(
            dash.logs.status,
            Some(Status::ok("Hämtar senaste..."))
        );
    }

    #[test]
    fn test_month_wraparound() {
        let mut dash = Dashboard::with_cursor(MonthCursor::new(2026, 11).unwrap(), 50);
        dash.step_month(1);
        assert_eq!(dash.cursor(), MonthCursor::new(2027, 0).unwrap());
        dash.step_month(-1);
        dash.step_month(-12);
        assert_eq!(dash.cursor(), MonthCursor::new(2025, 11).unwrap());
    }

    #[test]
    fn test_select_month_keeps_year() {
        let mut dash = dashboard();
        assert!(dash.select_month(7));
        assert_eq!(dash.cursor(), MonthCursor::new(2026, 7).unwrap());
        assert!(!dash.select_month(12));
        assert_eq!(dash.cursor().month(), 7);
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    #[test]
    fn test_shifts_loaded_follows_first_shift_year() {
        let mut dash = dashboard();
        dash.shifts_loaded(&Payload::Json(json!([
            {"date": "2027-03-04", "lastName": "Berg", "weekday": "Thu"},
            {"date": "2026-03-05", "lastName": "Lund"}
        ])));

        assert_eq!(dash.cursor(), MonthCursor::new(2027, 2).unwrap());
        assert_eq!(dash.shifts().len(), 2);
        match dash.schedule_view() {
            ScheduleView::Rows(table) => assert_eq!(table.rows.len(), 1),
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_shifts_loaded_keeps_year_without_date() {
        let mut dash = dashboard();
        dash.shifts_loaded(&Payload::Json(json!([{"lastName": "Berg"}])));
        assert_eq!(dash.cursor().year(), 2026);
    }

    #[test]
    fn test_empty_month_view() {
        let mut dash = dashboard();
        dash.shifts_loaded(&Payload::Json(json!([])));
        assert_eq!(
            dash.schedule_view(),
            ScheduleView::Empty("Inga pass hittades för Mars 2026.".to_string())
        );
    }

    #[test]
    fn test_shifts_failed_shows_error_without_meta() {
        let mut dash = dashboard();
        dash.shifts_loaded(&Payload::Json(json!([{"date": "2026-03-04"}])));
        dash.shifts_failed("Kunde inte hämta /shifts");

        let view = dash.schedule_view();
        assert_eq!(
            view,
            ScheduleView::Error("Fel: Kunde inte hämta /shifts".to_string())
        );
        assert!(view.meta().is_none());
        assert_eq!(dash.shifts().len(), 1);

        // A later success clears the error
        dash.shifts_loaded(&Payload::Json(json!([])));
        assert!(matches!(dash.schedule_view(), ScheduleView::Empty(_)));
    }

    #[test]
    fn test_failed_reload_keeps_cache_for_navigation() {
        let mut dash = dashboard();
        dash.shifts_loaded(&Payload::Json(json!([
            {"date": "2026-03-04", "lastName": "Berg", "weekday": "Wed"}
        ])));
        dash.shifts_failed("Kunde inte hämta /shifts");
        assert_eq!(dash.shifts().len(), 1);

        dash.step_month(1);
        dash.step_month(-1);
        match dash.schedule_view() {
            ScheduleView::Rows(table) => {
                assert_eq!(table.rows.len(), 1);
                assert_eq!(table.rows[0].people[0].name, "Berg");
            }
            other => panic!("expected cached rows, got {:?}", other),
        }

        dash.shifts_failed("Kunde inte hämta /shifts");
        assert!(dash.select_month(2));
        assert!(matches!(dash.schedule_view(), ScheduleView::Rows(_)));
    }

    // ========================================================================
    // Upload
    // ========================================================================

    #[test]
    fn test_upload_without_file_issues_nothing() {
        let mut dash = dashboard();
        dash.upload.path_input = "   ".to_string();
        assert_eq!(dash.submit_upload(), None);
        assert_eq!(dash.upload.status, Some(Status::error("Välj en fil först.")));
    }

    #[test]
    fn test_upload_missing_file_issues_nothing() {
        let mut dash = dashboard();
        dash.upload.path_input = "/definitely/not/here.xlsx".to_string();
        assert_eq!(dash.submit_upload(), None);
        assert_eq!(
            dash.upload.status,
            Some(Status::error("Filen finns inte: /definitely/not/here.xlsx"))
        );
    }

    #[test]
    fn test_upload_flow() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = scratch_file(&dir, "pass.xlsx");
        let mut dash = dashboard();
        dash.upload.response = Some(Payload::Text("old".to_string()));
        dash.upload.path_input = format!(" {} ", path.display());

        assert_eq!(dash.submit_upload(), Some(Request::Upload(path.clone())));
        assert_eq!(dash.upload.status, Some(Status::ok("Laddar upp...")));
        assert_eq!(dash.upload.response, None);

        let next = dash.upload_succeeded(Payload::Json(json!({"inserted": 3})));
        assert_eq!(next, Request::LoadShifts);
        assert_eq!(
            dash.upload.status,
            Some(Status::ok("Fil uppladdad och tolkad ✅"))
        );
        assert!(dash.upload.response.is_some());

        dash.upload_failed("Fel kolumner");
        assert_eq!(
            dash.upload.status,
            Some(Status::error("Fel vid uppladdning: Fel kolumner"))
        );
    }

    // ========================================================================
    // Logs
    // ========================================================================

    #[test]
    fn test_request_logs_statuses() {
        let mut dash = dashboard();
        dash.logs.output = Some(Payload::Text("old".to_string()));

        assert_eq!(
            dash.request_logs(LogKind::Errors),
            Request::Logs(LogRequest::Errors)
        );
        assert_eq!(dash.logs.status, Some(Status::ok("Hämtar fel-loggar...")));
        assert_eq!(dash.logs.output, None);
    }

    #[test]
    fn test_filtered_logs_use_fields() {
        let mut dash = dashboard();
        dash.logs.date_input = " 2026-03-14 ".to_string();
        dash.logs.limit_input = "10".to_string();

        assert_eq!(
            dash.request_logs(LogKind::Filtered),
            Request::Logs(LogRequest::Filtered(LogQuery {
                date: Some("2026-03-14".to_string()),
                limit: Some(10),
            }))
        );
        assert_eq!(dash.logs.status, Some(Status::ok("Filtrerar...")));
    }

    #[test]
    fn test_filtered_logs_limit_fallback() {
        let mut dash = dashboard();
        for bad in ["", "0", "abc", "-5"] {
            dash.logs.limit_input = bad.to_string();
            assert_eq!(
                dash.request_logs(LogKind::Filtered),
                Request::Logs(LogRequest::Filtered(LogQuery {
                    date: None,
                    limit: Some(50),
                })),
                "limit input {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_logs_loaded_and_failed() {
        let mut dash = dashboard();
        dash.logs_loaded(Payload::Text("line".to_string()));
        assert_eq!(dash.logs.status, Some(Status::ok("OK")));
        assert_eq!(dash.logs.output, Some(Payload::Text("line".to_string())));

        dash.logs_failed("Kunde inte hämta /logs");
        assert!(dash.logs.status.as_ref().is_some_and(Status::is_error));
        assert_eq!(
            dash.logs.status.as_ref().map(|s| s.message.as_str()),
            Some("Fel: Kunde inte hämta /logs")
        );
    }

    #[test]
    fn test_request_slots() {
        assert_eq!(Request::LoadShifts.slot(), Slot::Shifts);
        assert_eq!(Request::Upload(PathBuf::from("a.xlsx")).slot(), Slot::Upload);
        assert_eq!(Request::Logs(LogRequest::Errors).slot(), Slot::Logs);
    }
}
