//! Diagnostics view rendering.
//!
//! Shows the diagnosis of the last poll, the source being read, and in debug
//! mode every entry the normalizer dropped.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::dashboard::render_diagnosis_card;

/// Render the Diagnostics view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref readings) = app.readings else {
        return;
    };

    let constraints = if app.debug {
        [Constraint::Length(9), Constraint::Length(7), Constraint::Min(3)]
    } else {
        [Constraint::Length(9), Constraint::Min(7), Constraint::Length(0)]
    };
    let chunks = Layout::vertical(constraints).split(area);

    match readings.diagnosis {
        Some(ref diagnosis) => render_diagnosis_card(frame, &app.theme, diagnosis, chunks[0]),
        None => {
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Last poll succeeded",
                    app.theme.diagnosis_style(None).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    "{} usable records, {} shown.",
                    readings.valid,
                    readings.records.len()
                )),
            ])
            .block(bordered(app, " Status "));
            frame.render_widget(paragraph, chunks[0]);
        }
    }

    let skipped_hint = if readings.skipped.is_empty() || app.debug {
        String::new()
    } else {
        " (run with --debug to list them)".to_string()
    };
    let info = vec![
        Line::from(format!("Source:        {}", app.source_description())),
        Line::from(format!(
            "Fetched at:    {}",
            readings.fetched_at.format("%Y-%m-%d %H:%M:%S")
        )),
        Line::from(format!("Polls:         {}", app.poll_count)),
        Line::from(format!(
            "Entries:       {} usable, {} skipped{}",
            readings.valid,
            readings.skipped.len(),
            skipped_hint
        )),
        Line::from(format!("Max points:    {}", app.max_data_points)),
    ];
    frame.render_widget(Paragraph::new(info).block(bordered(app, " Poll ")), chunks[1]);

    if app.debug {
        render_skipped(frame, app, chunks[2]);
    }
}

fn render_skipped(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref readings) = app.readings else {
        return;
    };

    let items: Vec<ListItem> = readings
        .skipped
        .iter()
        .map(|s| {
            let key = if s.key.is_empty() { "<top level>" } else { s.key.as_str() };
            ListItem::new(Line::from(vec![
                Span::styled(key.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {}", s.reason)),
            ]))
        })
        .collect();

    let title = format!(" Skipped entries ({}) ", readings.skipped.len());
    let list = List::new(items)
        .block(bordered(app, &title))
        .highlight_style(app.theme.selected);

    let mut state = ListState::default();
    if !readings.skipped.is_empty() {
        state.select(Some(app.selected_row.min(readings.skipped.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn bordered<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}
