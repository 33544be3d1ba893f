//! Readings view rendering.
//!
//! The most recent records, oldest first, as the normalizer ordered them.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, TABLE_ROWS};
use crate::ui::dashboard::format_percent;

/// Render the Readings view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref readings) = app.readings else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let records = readings.tail(TABLE_ROWS);
    if records.is_empty() {
        let paragraph = Paragraph::new(" No readings to show")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block.title(" Latest readings "));
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Timestamp"),
        Cell::from("Light"),
        Cell::from("Raw"),
        Cell::from("Parsed"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = records
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.timestamp.clone()),
                Cell::from(format_percent(r.light_inte)),
                Cell::from(r.raw.map(|v| format!("{}", v)).unwrap_or_else(|| "-".to_string())),
                Cell::from(if r.parsed_time.is_some() { "yes" } else { "no" }),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Min(6),
    ];

    let selected = app.selected_row.min(records.len().saturating_sub(1));
    let title = format!(
        " Latest readings ({} of {}) [{}/{}] ",
        records.len(),
        readings.records.len(),
        selected + 1,
        records.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
