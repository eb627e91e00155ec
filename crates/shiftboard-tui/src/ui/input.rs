//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use shiftboard_core::models::MONTHS_SV;
use shiftboard_core::{LogKind, View};

use crate::app::{App, AppState, Field, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::LoggingIn => return handle_login_input(app, key),
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('j') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ShowingAlert => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.dismiss_alert();
            }
            return Ok(false);
        }
        AppState::SelectingMonth => {
            handle_month_picker_input(app, key);
            return Ok(false);
        }
        AppState::Editing(field) => {
            handle_field_input(app, field, key);
            return Ok(false);
        }
        AppState::Normal | AppState::Quitting => {}
    }

    app.status_message = None;

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('x') => {
            app.log_out()?;
            return Ok(false);
        }
        KeyCode::Char('1') => {
            app.set_view(View::Schedule);
            return Ok(false);
        }
        KeyCode::Char('2') => {
            app.set_view(View::Upload);
            return Ok(false);
        }
        KeyCode::Char('3') => {
            app.set_view(View::Logs);
            return Ok(false);
        }
        KeyCode::Tab => {
            app.set_view(app.dashboard.view().next());
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.set_view(app.dashboard.view().prev());
            return Ok(false);
        }
        _ => {}
    }

    match app.dashboard.view() {
        View::Schedule => handle_schedule_input(app, key),
        View::Upload => handle_upload_input(app, key),
        View::Logs => handle_logs_input(app, key),
    }
    Ok(false)
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.log_in()?;
            Ok(false)
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            app.state = AppState::Quitting;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn handle_month_picker_input(app: &mut App, key: KeyEvent) {
    let months = MONTHS_SV.len() as u32;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.month_picker_selection = (app.month_picker_selection + months - 1) % months;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.month_picker_selection = (app.month_picker_selection + 1) % months;
        }
        KeyCode::Enter => app.confirm_month_picker(),
        KeyCode::Esc | KeyCode::Char('m') => app.state = AppState::Normal,
        _ => {}
    }
}

fn handle_field_input(app: &mut App, field: Field, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.push_field_char(field, c),
        KeyCode::Backspace => app.pop_field_char(field),
        KeyCode::Esc => app.state = AppState::Normal,
        KeyCode::Enter => {
            app.state = AppState::Normal;
            match field {
                Field::UploadPath => app.submit_upload(),
                Field::LogDate | Field::LogLimit => app.request_logs(LogKind::Filtered),
            }
        }
        _ => {}
    }
}

fn handle_schedule_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.step_month(-1),
        KeyCode::Right | KeyCode::Char('l') => app.step_month(1),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_person(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_person(),
        KeyCode::Char('m') => app.open_month_picker(),
        KeyCode::Char('c') => app.copy_selected_phone(),
        KeyCode::Char('r') => app.reload_shifts(),
        _ => {}
    }
}

fn handle_upload_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('p') => app.state = AppState::Editing(Field::UploadPath),
        KeyCode::Enter | KeyCode::Char('s') => app.submit_upload(),
        KeyCode::Char('r') => app.reload_shifts(),
        _ => handle_scroll_input(app, key),
    }
}

fn handle_logs_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') | KeyCode::Char('r') => app.request_logs(LogKind::Latest),
        KeyCode::Char('e') => app.request_logs(LogKind::Errors),
        KeyCode::Char('f') => app.request_logs(LogKind::Filtered),
        KeyCode::Char('d') => app.state = AppState::Editing(Field::LogDate),
        KeyCode::Char('n') => app.state = AppState::Editing(Field::LogLimit),
        _ => handle_scroll_input(app, key),
    }
}

fn handle_scroll_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.output_scroll = app.output_scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.output_scroll = app.output_scroll.saturating_sub(1);
        }
        KeyCode::PageDown => {
            app.output_scroll = app.output_scroll.saturating_add(PAGE_SCROLL_SIZE);
        }
        KeyCode::PageUp => {
            app.output_scroll = app.output_scroll.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::Home => app.output_scroll = 0,
        _ => {}
    }
}
