use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use shiftboard_core::models::MONTHS_SV;
use shiftboard_core::{Slot, View};

use crate::app::{App, AppState};

use super::styles;
use super::tabs::{logs, schedule, upload};

/// Width of the navigation sidebar
const SIDEBAR_WIDTH: u16 = 20;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Sidebar + content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    render_title_bar(frame, app, chunks[0]);
    render_sidebar(frame, app, body[0]);
    render_main_content(frame, app, body[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::LoggingIn => render_login_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::SelectingMonth => render_month_picker(frame, app),
        AppState::ShowingAlert => render_alert_overlay(frame, app),
        AppState::Normal | AppState::Editing(_) | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Shiftboard";
    let view_title = format!(" · {}", app.dashboard.view().title());
    let help_hint = "[?] Hjälp";
    let used = title.chars().count() + view_title.chars().count() + help_hint.len() + 4;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(view_title, styles::muted_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.dashboard.view();

    let mut lines = vec![Line::from("")];
    for (i, view) in View::ALL.iter().enumerate() {
        let selected = *view == current;
        let marker = if selected { "▶" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), styles::highlight_style()),
            Span::styled(format!("[{}] ", i + 1), styles::muted_style()),
            Span::styled(view.title(), styles::tab_style(selected)),
        ]));
    }

    let padding = (area.height as usize).saturating_sub(lines.len() + 3);
    lines.extend(std::iter::repeat(Line::from("")).take(padding));
    lines.push(Line::from(vec![
        Span::styled("   [x] ", styles::muted_style()),
        Span::styled("Logga ut", styles::list_item_style()),
    ]));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.dashboard.view() {
        View::Schedule => schedule::render(frame, app, area),
        View::Upload => upload::render(frame, app, area),
        View::Logs => logs::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[r] ladda om | [q] avsluta";

    let loading = [
        (Slot::Shifts, "Hämtar pass..."),
        (Slot::Upload, "Laddar upp..."),
        (Slot::Logs, "Hämtar loggar..."),
    ]
    .into_iter()
    .find(|(slot, _)| app.is_loading(*slot))
    .map(|(_, label)| label);

    let left_text = match (&app.status_message, loading) {
        (Some(msg), _) => format!(" {} ", msg),
        (None, Some(label)) => format!(" {} ", label),
        (None, None) => format!(" {} ", app.api.base_url()),
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc.to_string(), styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Shiftboard", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Navigering", styles::highlight_style())),
        help_line("1-3", "Byt vy"),
        help_line("Tab", "Nästa vy"),
        help_line("x", "Logga ut"),
        help_line("q", "Avsluta"),
        Line::from(""),
        Line::from(Span::styled(" Schema", styles::highlight_style())),
        help_line("←/→", "Föregående/nästa månad"),
        help_line("m", "Välj månad"),
        help_line("↑/↓", "Markera person"),
        help_line("c", "Kopiera telefonnummer"),
        help_line("r", "Hämta pass igen"),
        Line::from(""),
        Line::from(Span::styled(" Ladda upp", styles::highlight_style())),
        help_line("p", "Ange fil"),
        help_line("Enter/s", "Ladda upp"),
        Line::from(""),
        Line::from(Span::styled(" Loggar", styles::highlight_style())),
        help_line("l / e", "Senaste / fel-loggar"),
        help_line("d / n", "Ange datum / max antal"),
        help_line("f", "Filtrera"),
        help_line("PgUp/PgDn", "Scrolla"),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Tryck ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" eller ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" för att stänga", styles::muted_style()),
        ]),
    ];

    let area = centered_rect_fixed(44, help_text.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(46, 10, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  Shiftboard", styles::title_style())),
        Line::from(Span::styled(
            format!("  {}", app.api.base_url()),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("  Du är inte inloggad.", styles::highlight_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [Enter]", styles::help_key_style()),
            Span::styled(" Logga in   ", styles::help_desc_style()),
            Span::styled("[Esc]", styles::help_key_style()),
            Span::styled(" Avsluta", styles::help_desc_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Logga in ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Vill du avsluta?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Tryck ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" för att avsluta, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" för att avbryta", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_month_picker(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(24, MONTHS_SV.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let current = app.dashboard.cursor().month();
    let items: Vec<ListItem> = MONTHS_SV
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i as u32 == current {
                styles::highlight_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(Span::styled(format!(" {}", name), style)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Välj månad {} ", app.dashboard.cursor().year()))
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .highlight_style(styles::selected_style());

    let mut state = ListState::default();
    state.select(Some(app.month_picker_selection as usize));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_alert_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(46, 8, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            " Kunde inte kopiera till urklipp.",
            styles::error_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", app.alert.as_deref().unwrap_or("")),
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" [Enter]", styles::help_key_style()),
            Span::styled(" Stäng", styles::help_desc_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(40, 10, outer), Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let outer = Rect::new(5, 5, 20, 8);
        let rect = centered_rect_fixed(40, 10, outer);
        assert_eq!(rect, Rect::new(5, 5, 20, 8));
    }
}
