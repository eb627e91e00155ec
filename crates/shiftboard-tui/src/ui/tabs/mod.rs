pub mod logs;
pub mod schedule;
pub mod upload;

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use shiftboard_core::{Payload, Status, StatusKind};

use crate::app::{App, AppState, Field};
use crate::ui::styles;

/// `Label: [value▌]` for an editable field
fn field_line(app: &App, field: Field, key: char) -> Line<'static> {
    let editing = app.state == AppState::Editing(field);
    let cursor = if editing { "▌" } else { "" };
    let value = app.field_value(field);

    Line::from(vec![
        Span::styled(format!(" [{}] ", key), styles::help_key_style()),
        Span::styled(format!("{}: ", field.label()), styles::muted_style()),
        Span::styled("[", styles::muted_style()),
        Span::styled(format!("{}{}", value, cursor), styles::input_style(editing)),
        Span::styled("]", styles::muted_style()),
    ])
}

fn status_line(status: Option<&Status>) -> Line<'static> {
    match status {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Ok => styles::success_style(),
                StatusKind::Error => styles::error_style(),
            };
            Line::from(Span::styled(format!(" {}", status.message), style))
        }
        None => Line::from(""),
    }
}

/// Bordered, scrollable panel showing a rendered payload
fn render_output(frame: &mut Frame, title: &str, output: Option<&Payload>, scroll: u16, area: Rect) {
    let text = output.map(Payload::render).unwrap_or_default();

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(output.is_some()));

    let paragraph = Paragraph::new(Text::raw(text))
        .style(styles::list_item_style())
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
