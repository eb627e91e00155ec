use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use shiftboard_core::schedule::{PersonEntry, ScheduleRow, BADGE_PLACEHOLDER};
use shiftboard_core::ScheduleView;

use crate::app::{App, COPIED_LABEL};
use crate::ui::styles;

/// Minimum row height so the weekday fits under the day number
const MIN_ROW_HEIGHT: u16 = 2;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Month navigation
            Constraint::Min(5),    // Table
            Constraint::Length(2), // Meta
        ])
        .split(area);

    render_month_bar(frame, app, chunks[0]);

    let view = app.dashboard.schedule_view();
    match &view {
        ScheduleView::Rows(table) => render_table(frame, app, &table.rows, chunks[1]),
        ScheduleView::Empty(message) => render_message(frame, message, styles::muted_style(), chunks[1]),
        ScheduleView::Error(message) => render_message(frame, message, styles::error_style(), chunks[1]),
    }

    let meta = view.meta().unwrap_or_default();
    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {}", meta), styles::muted_style())))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, chunks[2]);
}

fn render_month_bar(frame: &mut Frame, app: &App, area: Rect) {
    let cursor = app.dashboard.cursor();
    let line = Line::from(vec![
        Span::styled(" ◀ ", styles::muted_style()),
        Span::styled(cursor.to_string(), styles::title_style()),
        Span::styled(" ▶   ", styles::muted_style()),
        Span::styled("[←/→] ", styles::help_key_style()),
        Span::styled("månad  ", styles::muted_style()),
        Span::styled("[m] ", styles::help_key_style()),
        Span::styled("välj  ", styles::muted_style()),
        Span::styled("[c] ", styles::help_key_style()),
        Span::styled("kopiera nr", styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_message(frame: &mut Frame, message: &str, style: Style, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {}", message), style)))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Lit badge, or a muted dash
fn badge_cell(on: bool, label: &'static str) -> Cell<'static> {
    if on {
        Cell::from(Span::styled(format!(" {} ", label), styles::badge_style()))
    } else {
        Cell::from(Span::styled(format!(" {} ", BADGE_PLACEHOLDER), styles::muted_style()))
    }
}

fn name_line(person: &PersonEntry, style: Style) -> Line<'static> {
    let mut spans = vec![Span::styled(person.name.clone(), style)];
    if let Some(berth) = &person.berth_label {
        spans.push(Span::styled(format!("  {}", berth), styles::muted_style()));
    }
    Line::from(spans)
}

fn phone_line(app: &App, person: &PersonEntry, style: Style) -> Line<'static> {
    match &person.phone {
        Some(phone) if app.recently_copied(phone) => {
            Line::from(Span::styled(COPIED_LABEL, styles::success_style()))
        }
        Some(_) => Line::from(Span::styled(person.phone_label.clone(), style)),
        None => Line::from(Span::styled(person.phone_label.clone(), styles::muted_style())),
    }
}

fn render_table(frame: &mut Frame, app: &App, rows: &[ScheduleRow], area: Rect) {
    let header = Row::new([
        Cell::from("Dag"),
        Cell::from("Namn"),
        Cell::from("Tel"),
        Cell::from("14d"),
        Cell::from("1d"),
    ])
    .style(styles::title_style())
    .height(1);

    let mut offset = 0;
    let mut selected_row = None;
    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let mut names = Vec::with_capacity(row.people.len());
            let mut phones = Vec::with_capacity(row.people.len());
            for (i, person) in row.people.iter().enumerate() {
                let style = if offset + i == app.schedule_selection {
                    selected_row = Some(row_index);
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                };
                names.push(name_line(person, style));
                phones.push(phone_line(app, person, style));
            }
            offset += row.people.len();

            let day = row
                .day
                .map(|d| d.to_string())
                .unwrap_or_else(|| row.date.clone());
            let day_cell = Text::from(vec![
                Line::from(Span::styled(day, styles::highlight_style())),
                Line::from(Span::styled(row.weekday.clone(), styles::muted_style())),
            ]);

            let height = (row.people.len() as u16).max(MIN_ROW_HEIGHT);
            Row::new(vec![
                Cell::from(day_cell),
                Cell::from(Text::from(names)),
                Cell::from(Text::from(phones)),
                badge_cell(row.reminder_14d, "14d"),
                badge_cell(row.reminder_1d, "1d"),
            ])
            .height(height)
            .bottom_margin(1)
        })
        .collect();

    let widths = [
        Constraint::Length(8),  // Day + weekday
        Constraint::Fill(1),    // Names
        Constraint::Length(18), // "+46 70 123 45 67"
        Constraint::Length(5),
        Constraint::Length(5),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        );

    let mut state = TableState::default();
    state.select(selected_row);
    frame.render_stateful_widget(table, area, &mut state);
}
