//! Application state management for the shiftboard TUI.
//!
//! `App` wraps the core `Dashboard` with everything that only matters to a
//! terminal: overlay state, list selection, the clipboard and the background
//! task channel that network results come back through.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use shiftboard_core::schedule::PersonEntry;
use shiftboard_core::state::LogRequest;
use shiftboard_core::{
    ApiClient, ApiError, Config, Dashboard, LogKind, Payload, Request, RequestToken,
    RequestTracker, Session, Slot, View,
};

use crate::clipboard::{Clipboard, Osc52Clipboard};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// At most one task per slot is alive at a time.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// How long a copy button shows its confirmation
pub const COPY_FEEDBACK: Duration = Duration::from_millis(900);

/// Confirmation shown on a copy button
pub const COPIED_LABEL: &str = "Kopierat ✅";

/// Maximum length for the upload path field
const MAX_PATH_LENGTH: usize = 1024;

/// `YYYY-MM-DD`
const MAX_DATE_LENGTH: usize = 10;

const MAX_LIMIT_LENGTH: usize = 6;

/// Lines to scroll output panels on page up/down
pub const PAGE_SCROLL_SIZE: u16 = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Text fields that can be edited in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UploadPath,
    LogDate,
    LogLimit,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::UploadPath => "Fil",
            Field::LogDate => "Datum",
            Field::LogLimit => "Max antal",
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    LoggingIn,
    ConfirmingQuit,
    SelectingMonth,
    ShowingAlert,
    Editing(Field),
    Quitting,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Outcome of one spawned request, tagged with the token it was issued under
struct FetchResult {
    token: RequestToken,
    outcome: Result<Payload, ApiError>,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,
    pub dashboard: Dashboard,

    // UI State
    pub state: AppState,
    /// Index into the month's people, in display order
    pub schedule_selection: usize,
    pub month_picker_selection: u32,
    /// Scroll offset of the upload response or log output panel
    pub output_scroll: u16,

    // Background tasks
    tracker: RequestTracker,
    handles: HashMap<Slot, JoinHandle<()>>,
    fetch_rx: mpsc::Receiver<FetchResult>,
    fetch_tx: mpsc::Sender<FetchResult>,

    // Status message
    pub status_message: Option<String>,

    // Clipboard
    clipboard: Box<dyn Clipboard>,
    copied: Option<(String, Instant)>,
    pub alert: Option<String>,
}

impl App {
    /// Create the application with the session from the data directory
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = Config::data_dir().unwrap_or_else(|_| PathBuf::from("./data"));
        debug!(?data_dir, "Data directory configured");

        let mut session = Session::new(data_dir);
        if let Err(e) = session.load() {
            warn!(error = %e, "Failed to load session, starting logged out");
        }

        Self::with_parts(config, session, Box::new(Osc52Clipboard))
    }

    pub fn with_parts(
        config: Config,
        session: Session,
        clipboard: Box<dyn Clipboard>,
    ) -> Result<Self> {
        let api = ApiClient::from_config(&config).context("Invalid backend address")?;
        let dashboard = Dashboard::new(config.start_year(), config.log_limit);
        let (fetch_tx, fetch_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            session,
            api,
            dashboard,
            state: AppState::Normal,
            schedule_selection: 0,
            month_picker_selection: 0,
            output_scroll: 0,
            tracker: RequestTracker::new(),
            handles: HashMap::new(),
            fetch_rx,
            fetch_tx,
            status_message: None,
            clipboard,
            copied: None,
            alert: None,
        })
    }

    /// Open on the login gate, or load shifts when already logged in
    pub fn start(&mut self) {
        if self.session.is_logged_in() {
            self.dispatch(Request::LoadShifts);
        } else {
            self.state = AppState::LoggingIn;
        }
    }

    pub fn log_in(&mut self) -> Result<()> {
        self.session.log_in()?;
        info!("Logged in");
        self.state = AppState::Normal;
        self.dispatch(Request::LoadShifts);
        Ok(())
    }

    /// Clear the session flag and return to the login gate with fresh state
    pub fn log_out(&mut self) -> Result<()> {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
        self.tracker.cancel_all();
        self.session.log_out()?;
        info!("Logged out");

        self.dashboard = Dashboard::new(self.config.start_year(), self.config.log_limit);
        self.schedule_selection = 0;
        self.output_scroll = 0;
        self.status_message = None;
        self.state = AppState::LoggingIn;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------------

    /// Spawn `request` in the background, superseding the slot's previous one
    pub fn dispatch(&mut self, request: Request) {
        let slot = request.slot();
        let token = self.tracker.issue(slot);
        if let Some(previous) = self.handles.remove(&slot) {
            previous.abort();
        }
        debug!(?request, generation = token.generation, "Dispatching request");

        let api = self.api.clone();
        let tx = self.fetch_tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = match &request {
                Request::LoadShifts => api.fetch_shifts().await,
                Request::Upload(path) => api.upload_excel(path).await,
                Request::Logs(LogRequest::Latest) => api.fetch_logs_latest().await,
                Request::Logs(LogRequest::Errors) => api.fetch_logs_errors().await,
                Request::Logs(LogRequest::Filtered(query)) => api.fetch_logs(query).await,
            };
            if tx.send(FetchResult { token, outcome }).await.is_err() {
                debug!("Result channel closed, dropping response");
            }
        });
        self.handles.insert(slot, handle);
    }

    fn dispatch_opt(&mut self, request: Option<Request>) {
        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    pub fn is_loading(&self, slot: Slot) -> bool {
        self.tracker.in_flight(slot)
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.fetch_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.process_fetch_result(result);
        }

        if self
            .copied
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= COPY_FEEDBACK)
        {
            self.copied = None;
        }
    }

    fn process_fetch_result(&mut self, result: FetchResult) {
        let FetchResult { token, outcome } = result;
        if !self.tracker.complete(token) {
            debug!(slot = ?token.slot, generation = token.generation, "Discarding stale result");
            return;
        }
        self.handles.remove(&token.slot);

        match (token.slot, outcome) {
            (Slot::Shifts, Ok(payload)) => {
                self.dashboard.shifts_loaded(&payload);
                self.clamp_schedule_selection();
            }
            (Slot::Shifts, Err(e)) => {
                warn!(error = %e, "Failed to load shifts");
                self.dashboard.shifts_failed(&e);
                self.schedule_selection = 0;
            }
            (Slot::Upload, Ok(payload)) => {
                info!("Upload accepted");
                self.output_scroll = 0;
                let reload = self.dashboard.upload_succeeded(payload);
                self.dispatch(reload);
            }
            (Slot::Upload, Err(e)) => {
                warn!(error = %e, "Upload failed");
                self.dashboard.upload_failed(&e);
            }
            (Slot::Logs, Ok(payload)) => {
                self.output_scroll = 0;
                self.dashboard.logs_loaded(payload);
            }
            (Slot::Logs, Err(e)) => {
                warn!(error = %e, "Failed to load logs");
                self.dashboard.logs_failed(&e);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn set_view(&mut self, view: View) {
        if view != self.dashboard.view() {
            self.output_scroll = 0;
        }
        let request = self.dashboard.set_view(view);
        self.dispatch_opt(request);
    }

    pub fn step_month(&mut self, delta: i32) {
        self.dashboard.step_month(delta);
        self.schedule_selection = 0;
    }

    pub fn open_month_picker(&mut self) {
        self.month_picker_selection = self.dashboard.cursor().month();
        self.state = AppState::SelectingMonth;
    }

    pub fn confirm_month_picker(&mut self) {
        if self.dashboard.select_month(self.month_picker_selection) {
            self.schedule_selection = 0;
        }
        self.state = AppState::Normal;
    }

    pub fn reload_shifts(&mut self) {
        self.dispatch(Request::LoadShifts);
    }

    pub fn submit_upload(&mut self) {
        let request = self.dashboard.submit_upload();
        self.dispatch_opt(request);
    }

    pub fn request_logs(&mut self, kind: LogKind) {
        let request = self.dashboard.request_logs(kind);
        self.dispatch(request);
    }

    // ------------------------------------------------------------------------
    // Schedule selection
    // ------------------------------------------------------------------------

    /// Number of people shown for the selected month
    pub fn person_count(&self) -> usize {
        self.dashboard
            .schedule_table()
            .rows
            .iter()
            .map(|r| r.people.len())
            .sum()
    }

    pub fn selected_person(&self) -> Option<PersonEntry> {
        self.dashboard
            .schedule_table()
            .rows
            .into_iter()
            .flat_map(|r| r.people)
            .nth(self.schedule_selection)
    }

    pub fn select_next_person(&mut self) {
        let count = self.person_count();
        if count > 0 && self.schedule_selection + 1 < count {
            self.schedule_selection += 1;
        }
    }

    pub fn select_prev_person(&mut self) {
        self.schedule_selection = self.schedule_selection.saturating_sub(1);
    }

    fn clamp_schedule_selection(&mut self) {
        let count = self.person_count();
        if self.schedule_selection >= count {
            self.schedule_selection = count.saturating_sub(1);
        }
    }

    // ------------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------------

    /// Copy the selected person's phone number. A failed clipboard write
    /// shows the number in an alert instead.
    pub fn copy_selected_phone(&mut self) {
        let Some(phone) = self.selected_person().and_then(|p| p.phone) else {
            self.status_message = Some("Inget nummer att kopiera".to_string());
            return;
        };

        match self.clipboard.copy(&phone) {
            Ok(()) => {
                debug!("Copied phone number");
                self.copied = Some((phone, Instant::now()));
            }
            Err(e) => {
                warn!(error = %e, "Clipboard write failed");
                self.alert = Some(phone);
                self.state = AppState::ShowingAlert;
            }
        }
    }

    /// Whether `phone` was copied within the feedback window
    pub fn recently_copied(&self, phone: &str) -> bool {
        self.copied
            .as_ref()
            .is_some_and(|(copied, at)| copied == phone && at.elapsed() < COPY_FEEDBACK)
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.state = AppState::Normal;
    }

    // ------------------------------------------------------------------------
    // Field editing
    // ------------------------------------------------------------------------

    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::UploadPath => &self.dashboard.upload.path_input,
            Field::LogDate => &self.dashboard.logs.date_input,
            Field::LogLimit => &self.dashboard.logs.limit_input,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::UploadPath => &mut self.dashboard.upload.path_input,
            Field::LogDate => &mut self.dashboard.logs.date_input,
            Field::LogLimit => &mut self.dashboard.logs.limit_input,
        }
    }

    pub fn push_field_char(&mut self, field: Field, c: char) {
        let len = self.field_value(field).chars().count();
        if can_add_field_char(field, len, c) {
            self.field_mut(field).push(c);
        }
    }

    pub fn pop_field_char(&mut self, field: Field) {
        self.field_mut(field).pop();
    }

    pub fn clear_field(&mut self, field: Field) {
        self.field_mut(field).clear();
    }
}

// ============================================================================
// Input validation helpers
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a character should be accepted into `field`
pub fn can_add_field_char(field: Field, current_len: usize, c: char) -> bool {
    match field {
        Field::UploadPath => current_len < MAX_PATH_LENGTH && is_valid_input_char(c),
        Field::LogDate => current_len < MAX_DATE_LENGTH && (c.is_ascii_digit() || c == '-'),
        Field::LogLimit => current_len < MAX_LIMIT_LENGTH && c.is_ascii_digit(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shiftboard_core::api::StatusCode;
    use shiftboard_core::{MonthCursor, ScheduleView};
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct RecordingClipboard {
        copied: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn copy(&mut self, text: &str) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Other, "no terminal"));
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    /// The returned directory holds the session file and is removed on drop
    fn test_app(clipboard: RecordingClipboard) -> (tempfile::TempDir, App) {
        let data = tempfile::tempdir().expect("tempdir");
        let config = Config {
            base_url: "http://127.0.0.1:9".to_string(),
            default_year: Some(2026),
            ..Default::default()
        };
        let session = Session::new(data.path().join("data"));
        let mut app = App::with_parts(config, session, Box::new(clipboard)).unwrap();
        app.dashboard = Dashboard::with_cursor(MonthCursor::new(2026, 2).unwrap(), 50);
        (data, app)
    }

    fn march_shifts() -> Payload {
        Payload::Json(json!([
            {"date": "2026-03-04", "firstName": "Bo", "lastName": "Ek", "phone": "+46701234567"},
            {"date": "2026-03-04", "firstName": "Anna", "lastName": "Berg"},
            {"date": "2026-03-09", "firstName": "Cia", "lastName": "Lund", "phone": "0701112233"}
        ]))
    }

    fn deliver(app: &mut App, token: RequestToken, outcome: Result<Payload, ApiError>) {
        app.process_fetch_result(FetchResult { token, outcome });
    }

    // -------------------------------------------------------------------------
    // Background results
    // -------------------------------------------------------------------------

    #[test]
    fn test_stale_shift_result_is_discarded() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        let old = app.tracker.issue(Slot::Shifts);
        let new = app.tracker.issue(Slot::Shifts);

        deliver(&mut app, old, Ok(march_shifts()));
        assert!(app.dashboard.shifts().is_empty());
        assert!(app.is_loading(Slot::Shifts));

        deliver(&mut app, new, Ok(march_shifts()));
        assert_eq!(app.dashboard.shifts().len(), 3);
        assert!(!app.is_loading(Slot::Shifts));
    }

    #[test]
    fn test_shift_failure_shows_error_view() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        let token = app.tracker.issue(Slot::Shifts);
        let error = ApiError::fetch_failed(reqwest_status(500), "/shifts");
        deliver(&mut app, token, Err(error));

        assert_eq!(
            app.dashboard.schedule_view(),
            ScheduleView::Error("Fel: Kunde inte hämta /shifts".to_string())
        );
    }

    #[test]
    fn test_logs_result_updates_panel() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        let token = app.tracker.issue(Slot::Logs);
        app.output_scroll = 4;
        deliver(&mut app, token, Ok(Payload::Text("rad 1".to_string())));

        assert_eq!(app.dashboard.logs.output, Some(Payload::Text("rad 1".to_string())));
        assert_eq!(app.output_scroll, 0);
    }

    #[tokio::test]
    async fn test_upload_success_reloads_shifts() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        let token = app.tracker.issue(Slot::Upload);
        deliver(&mut app, token, Ok(Payload::Json(json!({"inserted": 1}))));

        assert!(app.is_loading(Slot::Shifts));
        assert_eq!(
            app.dashboard.upload.status.as_ref().map(|s| s.message.as_str()),
            Some("Fil uppladdad och tolkad ✅")
        );
    }

    #[test]
    fn test_upload_without_file_dispatches_nothing() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        app.submit_upload();
        assert!(!app.is_loading(Slot::Upload));
        assert!(app
            .dashboard
            .upload
            .status
            .as_ref()
            .is_some_and(|s| s.is_error()));
    }

    // -------------------------------------------------------------------------
    // Selection and clipboard
    // -------------------------------------------------------------------------

    #[test]
    fn test_selection_follows_display_order() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        let token = app.tracker.issue(Slot::Shifts);
        deliver(&mut app, token, Ok(march_shifts()));

        assert_eq!(app.person_count(), 3);
        assert_eq!(app.selected_person().map(|p| p.name), Some("Anna Berg".to_string()));
        app.select_next_person();
        app.select_next_person();
        app.select_next_person();
        assert_eq!(app.selected_person().map(|p| p.name), Some("Cia Lund".to_string()));
        app.select_prev_person();
        assert_eq!(app.selected_person().map(|p| p.name), Some("Bo Ek".to_string()));

        app.step_month(1);
        assert_eq!(app.schedule_selection, 0);
        assert_eq!(app.person_count(), 0);
    }

    #[test]
    fn test_copy_phone_shows_feedback() {
        let clipboard = RecordingClipboard::default();
        let (_data, mut app) = test_app(clipboard.clone());
        let token = app.tracker.issue(Slot::Shifts);
        deliver(&mut app, token, Ok(march_shifts()));

        app.select_next_person();
        app.copy_selected_phone();
        assert_eq!(*clipboard.copied.borrow(), vec!["+46701234567".to_string()]);
        assert!(app.recently_copied("+46701234567"));
        assert!(!app.recently_copied("0701112233"));
    }

    #[test]
    fn test_copy_without_phone_does_nothing() {
        let clipboard = RecordingClipboard::default();
        let (_data, mut app) = test_app(clipboard.clone());
        let token = app.tracker.issue(Slot::Shifts);
        deliver(&mut app, token, Ok(march_shifts()));

        app.copy_selected_phone();
        assert!(clipboard.copied.borrow().is_empty());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_copy_failure_shows_alert() {
        let clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let (_data, mut app) = test_app(clipboard);
        let token = app.tracker.issue(Slot::Shifts);
        deliver(&mut app, token, Ok(march_shifts()));

        app.select_next_person();
        app.copy_selected_phone();
        assert_eq!(app.state, AppState::ShowingAlert);
        assert_eq!(app.alert.as_deref(), Some("+46701234567"));

        app.dismiss_alert();
        assert_eq!(app.state, AppState::Normal);
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    #[test]
    fn test_start_without_session_shows_login() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        app.start();
        assert_eq!(app.state, AppState::LoggingIn);
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        app.log_in().unwrap();
        assert_eq!(app.state, AppState::Normal);
        assert!(app.session.is_logged_in());
        assert!(app.is_loading(Slot::Shifts));

        app.dashboard.upload.path_input = "pass.xlsx".to_string();
        app.log_out().unwrap();
        assert_eq!(app.state, AppState::LoggingIn);
        assert!(!app.session.is_logged_in());
        assert!(app.dashboard.upload.path_input.is_empty());
        assert!(!app.is_loading(Slot::Shifts));
    }

    // -------------------------------------------------------------------------
    // Input validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_field_char() {
        assert!(can_add_field_char(Field::UploadPath, 0, '/'));
        assert!(can_add_field_char(Field::UploadPath, 0, 'ö'));
        assert!(!can_add_field_char(Field::UploadPath, 0, '\n'));
        assert!(!can_add_field_char(Field::UploadPath, MAX_PATH_LENGTH, 'a'));

        assert!(can_add_field_char(Field::LogDate, 4, '-'));
        assert!(!can_add_field_char(Field::LogDate, 4, 'x'));
        assert!(!can_add_field_char(Field::LogDate, 10, '1'));

        assert!(can_add_field_char(Field::LogLimit, 0, '5'));
        assert!(!can_add_field_char(Field::LogLimit, 0, '-'));
    }

    #[test]
    fn test_field_editing() {
        let (_data, mut app) = test_app(RecordingClipboard::default());
        app.clear_field(Field::LogLimit);
        for c in "12a3".chars() {
            app.push_field_char(Field::LogLimit, c);
        }
        assert_eq!(app.field_value(Field::LogLimit), "123");
        app.pop_field_char(Field::LogLimit);
        assert_eq!(app.field_value(Field::LogLimit), "12");
    }

    fn reqwest_status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }
}
