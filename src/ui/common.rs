//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the state of the last poll.
///
/// Displays: status indicator, source, record count, refresh mode.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref readings) = app.readings else {
        let line = Line::from(vec![
            Span::styled(" LUXWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("│ {} │ Loading...", app.source_description())),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let diagnosis = readings.diagnosis.as_ref();
    let status_style = app.theme.diagnosis_style(diagnosis);
    let status = diagnosis.map(|d| d.title()).unwrap_or("OK");

    let refresh = if app.auto_refresh {
        format!("every {}s", app.refresh_interval.as_secs())
    } else {
        "paused".to_string()
    };

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("LUXWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.source_description().to_string()),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", readings.records.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" records │ "),
        Span::styled(status, status_style),
        Span::raw(" │ "),
        Span::styled(refresh, Style::default().add_modifier(Modifier::DIM)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Dashboard "),
        Line::from(" 2:Readings "),
        Line::from(" 3:Diagnostics "),
    ];

    let selected = match app.current_view {
        View::Dashboard => 0,
        View::Table => 1,
        View::Diagnostics => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current view, last update time, next poll, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref readings) = app.readings {
        let elapsed = readings.last_updated.elapsed();
        let next = match app.next_poll_in(Instant::now()) {
            Some(d) => format!("next in {}s", d.as_secs()),
            None => "auto refresh off".to_string(),
        };

        let controls = match app.current_view {
            View::Dashboard => "r:refresh a:auto e:export Tab:switch ?:help q:quit",
            View::Table | View::Diagnostics => "↑↓:scroll r:refresh Tab:switch ?:help q:quit",
        };

        format!(
            " {} | Updated {} ({:.1}s ago) | {} | {}",
            app.current_view.label(),
            readings.fetched_at.format("%H:%M:%S"),
            elapsed.as_secs_f64(),
            next,
            controls,
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Jump to view"),
        Line::from("  ↑/↓ j/k     Scroll list"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Back to dashboard"),
        Line::from(""),
        section(" Data"),
        Line::from("  r           Refresh now"),
        Line::from("  a           Toggle auto refresh"),
        Line::from("  e           Export to JSON"),
        Line::from(""),
        section(" General"),
        Line::from("  ?           Toggle help"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
