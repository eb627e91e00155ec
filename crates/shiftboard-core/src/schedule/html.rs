//! Standalone HTML export of a month's schedule.

use std::fmt::Write;

use super::{PersonEntry, ScheduleRow, ScheduleTable, BADGE_PLACEHOLDER};
use crate::utils::escape_html;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;color:#1d2330}\
table{border-collapse:collapse;width:100%}\
th,td{border-bottom:1px solid #dde1e8;padding:.5rem;text-align:left;vertical-align:top}\
.day{font-weight:600;white-space:nowrap}\
.wd{color:#6b7385;font-size:.85em}\
.berth{color:#6b7385;font-size:.85em}\
.badge{display:inline-block;border-radius:4px;padding:0 .4rem;background:#2e7d4f;color:#fff}\
.muted{color:#b0b6c2}\
.meta{color:#6b7385}";

fn badge(on: bool, label: &str) -> String {
    if on {
        format!("<span class=\"badge\">{}</span>", escape_html(label))
    } else {
        format!("<span class=\"muted\">{}</span>", BADGE_PLACEHOLDER)
    }
}

fn person_cell(person: &PersonEntry) -> String {
    let mut cell = format!("<div>{}", escape_html(&person.name));
    if let Some(berth) = &person.berth_label {
        let _ = write!(cell, " <span class=\"berth\">{}</span>", escape_html(berth));
    }
    cell.push_str("</div>");
    cell
}

fn row_html(row: &ScheduleRow) -> String {
    let day = row
        .day
        .map(|d| d.to_string())
        .unwrap_or_else(|| row.date.clone());
    let names: String = row.people.iter().map(person_cell).collect();
    let phones: String = row
        .people
        .iter()
        .map(|p| format!("<div>{}</div>", escape_html(&p.phone_label)))
        .collect();

    format!(
        "<tr><td class=\"day\">{} <span class=\"wd\">{}</span></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        escape_html(&day),
        escape_html(&row.weekday),
        names,
        phones,
        badge(row.reminder_14d, "14d"),
        badge(row.reminder_1d, "1d"),
    )
}

/// Render `table` as a complete HTML document
pub fn render_html(table: &ScheduleTable) -> String {
    let title = format!("Schema {}", table.cursor);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"sv\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&title));
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&title));

    if table.is_empty() {
        let _ = writeln!(html, "<p class=\"meta\">{}</p>", escape_html(&table.empty_message()));
    } else {
        html.push_str(
            "<table>\n<thead><tr><th>Dag</th><th>Namn</th><th>Tel</th><th>14d</th><th>1d</th></tr></thead>\n<tbody>\n",
        );
        for row in &table.rows {
            html.push_str(&row_html(row));
        }
        html.push_str("</tbody>\n</table>\n");
        if let Some(meta) = table.meta() {
            let _ = writeln!(html, "<p class=\"meta\">{}</p>", escape_html(&meta));
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}
