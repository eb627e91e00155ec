use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Field};
use crate::ui::styles;

use super::{field_line, render_output, status_line};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Actions and filter
            Constraint::Min(3),    // Output
        ])
        .split(area);

    let logs = &app.dashboard.logs;
    let actions = Line::from(vec![
        Span::styled(" [l] ", styles::help_key_style()),
        Span::styled("Senaste  ", styles::help_desc_style()),
        Span::styled("[e] ", styles::help_key_style()),
        Span::styled("Fel-loggar  ", styles::help_desc_style()),
        Span::styled("[f] ", styles::help_key_style()),
        Span::styled("Filtrera", styles::help_desc_style()),
    ]);

    let lines = vec![
        actions,
        Line::from(""),
        field_line(app, Field::LogDate, 'd'),
        field_line(app, Field::LogLimit, 'n'),
        status_line(logs.status.as_ref()),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    render_output(frame, "Loggar", logs.output.as_ref(), app.output_scroll, chunks[1]);
}
