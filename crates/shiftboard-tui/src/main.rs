//! Shiftboard - a terminal dashboard for the shift scheduling service.
//!
//! Upload the season's spreadsheet, browse the monthly schedule and read
//! the backend's logs without leaving the terminal.

mod app;
mod clipboard;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shiftboard_core::schedule::render_html;
use shiftboard_core::{build_schedule, ApiClient, ApiError, Config, Dashboard, MonthCursor, Payload, Shift};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file prefix inside the log directory
const LOG_FILE_PREFIX: &str = "shiftboard.log";

// ============================================================================
// Command line
// ============================================================================

#[derive(Debug, PartialEq)]
enum Command {
    Tui,
    /// Print a month's rows as JSON
    DumpSchedule(Option<MonthCursor>),
    /// Write a month's table as an HTML document
    ExportHtml(MonthCursor, PathBuf),
    /// Probe the read endpoints
    CheckEndpoints,
}

fn parse_month(arg: &str) -> Result<MonthCursor> {
    MonthCursor::parse(arg).with_context(|| format!("Expected YYYY-MM, got {:?}", arg))
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some(flag) = args.get(1) else {
        return Ok(Command::Tui);
    };

    match flag.as_str() {
        "--dump-schedule" => {
            let month = args.get(2).map(|m| parse_month(m)).transpose()?;
            Ok(Command::DumpSchedule(month))
        }
        "--export-html" => match (args.get(2), args.get(3)) {
            (Some(month), Some(path)) => Ok(Command::ExportHtml(parse_month(month)?, PathBuf::from(path))),
            _ => bail!("Usage: shiftboard --export-html YYYY-MM PATH"),
        },
        "--check-endpoints" => Ok(Command::CheckEndpoints),
        other => bail!(
            "Unknown argument {:?}. Options: --dump-schedule [YYYY-MM], --export-html YYYY-MM PATH, --check-endpoints",
            other
        ),
    }
}

// ============================================================================
// Logging
// ============================================================================

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to a daily rolling file so the terminal screen stays clean.
/// The returned guard flushes the writer on drop.
fn init_tracing() -> Result<WorkerGuard> {
    let log_dir = Config::log_dir()?;
    std::fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Ok(guard)
}

/// CLI modes have no screen to protect and log to stderr
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

// ============================================================================
// Entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    match parse_args(&args)? {
        Command::Tui => run_tui().await,
        Command::DumpSchedule(month) => {
            init_cli_tracing();
            dump_schedule(&load_config(), month).await
        }
        Command::ExportHtml(month, path) => {
            init_cli_tracing();
            export_html(&load_config(), month, &path).await
        }
        Command::CheckEndpoints => {
            init_cli_tracing();
            check_endpoints(&load_config()).await
        }
    }
}

async fn run_tui() -> Result<()> {
    let _guard = init_tracing()?;
    info!("Shiftboard starting");

    let mut app = App::new(load_config())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Shiftboard shutting down");
    Ok(())
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            let mut config = Config::default();
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Ctrl+C to quit
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    if handle_input(app, key)? {
                        return Ok(());
                    }
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

// ============================================================================
// CLI modes
// ============================================================================

/// Fetch shifts and settle on a month the way the dashboard does: the
/// requested one, or the current month of the first shift's year.
async fn fetch_month(config: &Config, month: Option<MonthCursor>) -> Result<(Vec<Shift>, MonthCursor)> {
    let api = ApiClient::from_config(config)?;
    eprintln!("Fetching shifts from {}...", api.base_url());

    let payload = api.fetch_shifts().await?;
    let mut dashboard = Dashboard::new(config.start_year(), config.log_limit);
    dashboard.shifts_loaded(&payload);

    let cursor = month.unwrap_or_else(|| dashboard.cursor());
    Ok((dashboard.shifts().to_vec(), cursor))
}

/// Print the month's schedule rows to stdout as JSON
async fn dump_schedule(config: &Config, month: Option<MonthCursor>) -> Result<()> {
    let (shifts, cursor) = fetch_month(config, month).await?;
    let table = build_schedule(&shifts, cursor);

    println!("{}", serde_json::to_string_pretty(&table)?);
    eprintln!("{} shifts, {} dates in {}", shifts.len(), table.rows.len(), cursor);
    Ok(())
}

async fn export_html(config: &Config, month: MonthCursor, path: &Path) -> Result<()> {
    let (shifts, cursor) = fetch_month(config, Some(month)).await?;
    let table = build_schedule(&shifts, cursor);

    std::fs::write(path, render_html(&table))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Wrote {} dates for {} to {}", table.rows.len(), cursor, path.display());
    Ok(())
}

fn describe(payload: &Payload) -> String {
    match payload {
        Payload::Json(serde_json::Value::Array(items)) => format!("JSON, {} items", items.len()),
        Payload::Json(_) => "JSON".to_string(),
        Payload::Text(text) => format!("text, {} lines", text.lines().count()),
    }
}

fn report(path: &str, result: &Result<Payload, ApiError>) -> bool {
    match result {
        Ok(payload) => {
            eprintln!("✓ {} ({})", path, describe(payload));
            true
        }
        Err(e) => {
            eprintln!("✗ {}: {}", path, e);
            false
        }
    }
}

/// Probe the read endpoints concurrently and report each one
async fn check_endpoints(config: &Config) -> Result<()> {
    let api = ApiClient::from_config(config)?;
    eprintln!("Checking {}...\n", api.base_url());

    let (shifts, latest, errors) = futures::join!(
        api.fetch_shifts(),
        api.fetch_logs_latest(),
        api.fetch_logs_errors(),
    );

    let results = [
        report("/shifts", &shifts),
        report("/logs/latest", &latest),
        report("/logs/errors", &errors),
    ];
    let failed = results.iter().filter(|ok| !**ok).count();
    if failed > 0 {
        bail!("{} of {} endpoints failed", failed, results.len());
    }
    Ok(())
}
