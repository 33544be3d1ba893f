//! Dashboard view rendering.
//!
//! Four summary metrics across the top and the light intensity chart below.
//! When the last poll produced nothing to chart, the chart area shows the
//! diagnosis instead.

use chrono::DateTime;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{Diagnosis, Readings, XAxis};
use crate::ui::Theme;

/// Render the Dashboard view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref readings) = app.readings else {
        return;
    };

    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(6)]).split(area);

    render_metrics(frame, app, readings, chunks[0]);

    match readings.diagnosis {
        Some(ref diagnosis) if readings.is_empty() => {
            render_diagnosis_card(frame, &app.theme, diagnosis, chunks[1])
        }
        _ => render_chart(frame, app, readings, chunks[1]),
    }
}

fn render_metrics(frame: &mut Frame, app: &App, readings: &Readings, area: Rect) {
    let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    let values = match readings.summary {
        Some(ref s) => [Some(s.current), Some(s.mean), Some(s.max), Some(s.min)],
        None => [None; 4],
    };
    let labels = ["Current", "Average", "Maximum", "Minimum"];

    for ((label, value), cell) in labels.iter().zip(values).zip(cells.iter()) {
        let text = value.map(format_percent).unwrap_or_else(|| "-".to_string());
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        )))
        .centered()
        .block(
            Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );
        frame.render_widget(paragraph, *cell);
    }
}

fn render_chart(frame: &mut Frame, app: &App, readings: &Readings, area: Rect) {
    let (axis, points) = readings.chart_points();
    let (x_bounds, y_bounds) = chart_bounds(axis, &points);

    let title = match readings.valid.saturating_sub(readings.records.len()) {
        0 => format!(" Light intensity ({} points) ", points.len()),
        dropped => format!(
            " Light intensity (latest {} of {}) ",
            points.len(),
            points.len() + dropped
        ),
    };

    let datasets = vec![Dataset::default()
        .name("light_inte")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.series))
        .data(&points)];

    let x_title = match axis {
        XAxis::Time => "Time (UTC)",
        XAxis::Index => "Reading",
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .title(x_title)
                .style(Style::default().fg(app.theme.border))
                .bounds(x_bounds)
                .labels(x_labels(axis, x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Light %")
                .style(Style::default().fg(app.theme.border))
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Render a diagnosis with its remediation steps.
///
/// Shared with the Diagnostics view.
pub fn render_diagnosis_card(frame: &mut Frame, theme: &Theme, diagnosis: &Diagnosis, area: Rect) {
    let style = theme.diagnosis_style(Some(diagnosis));

    let mut lines = vec![
        Line::from(Span::styled(diagnosis.title(), style.add_modifier(Modifier::BOLD))),
        Line::from(diagnosis.message()),
        Line::from(""),
        Line::from(Span::styled(
            "What to try:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(
        diagnosis
            .remediation()
            .iter()
            .map(|step| Line::from(format!("  • {}", step))),
    );

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" No chart ")
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(style),
    );
    frame.render_widget(paragraph, area);
}

/// Format a light intensity value the way the metrics show it.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Axis bounds that keep a single point or a flat line visible.
pub fn chart_bounds(axis: XAxis, points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let (mut x_min, mut x_max) = min_max(points.iter().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y_lo, y_hi) = min_max(points.iter().map(|p| p.1)).unwrap_or((0.0, 100.0));

    if x_max - x_min < f64::EPSILON {
        let pad = match axis {
            XAxis::Time => 30.0,
            XAxis::Index => 1.0,
        };
        x_min -= pad;
        x_max += pad;
    }

    let margin = (y_hi - y_lo).max(1.0) * 0.15;
    let y_min = if y_lo >= 0.0 {
        (y_lo - margin).max(0.0)
    } else {
        y_lo - margin
    };
    let y_max = y_hi + margin;

    ([x_min, x_max], [y_min, y_max])
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn x_labels(axis: XAxis, bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|&x| match axis {
            XAxis::Time => format_epoch(x),
            XAxis::Index => format!("{:.0}", x),
        })
        .collect()
}

fn format_epoch(secs: f64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|t| t.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
