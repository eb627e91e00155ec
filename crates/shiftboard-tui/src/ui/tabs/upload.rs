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
            Constraint::Length(6), // Form
            Constraint::Min(3),    // Response
        ])
        .split(area);

    let upload = &app.dashboard.upload;
    let lines = vec![
        Line::from(Span::styled(
            " Ladda upp ett Excel-schema (.xlsx)",
            styles::title_style(),
        )),
        Line::from(""),
        field_line(app, Field::UploadPath, 'p'),
        Line::from(vec![
            Span::styled(" [Enter/s] ", styles::help_key_style()),
            Span::styled("Ladda upp", styles::help_desc_style()),
        ]),
        status_line(upload.status.as_ref()),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    render_output(
        frame,
        "Svar",
        upload.response.as_ref(),
        app.output_scroll,
        chunks[1],
    );
}
