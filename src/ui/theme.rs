//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Diagnosis;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Line color of the light intensity series.
    pub series: Color,
    /// Color for transient problems (timeouts, no data yet).
    pub warning: Color,
    /// Color for problems that need a configuration change.
    pub critical: Color,
    /// Color for a healthy poll.
    pub healthy: Color,
    /// Color for borders, separators and axes.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            series: Color::Yellow,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            series: Color::Magenta,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for the outcome of the last poll.
    pub fn diagnosis_style(&self, diagnosis: Option<&Diagnosis>) -> Style {
        match diagnosis {
            None => Style::default().fg(self.healthy),
            Some(d) if d.is_configuration_problem() => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
            Some(_) => Style::default().fg(self.warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_style() {
        let theme = Theme::dark();
        assert_eq!(theme.diagnosis_style(None).fg, Some(Color::Green));
        assert_eq!(
            theme.diagnosis_style(Some(&Diagnosis::Timeout)).fg,
            Some(Color::Yellow)
        );
        let denied = theme.diagnosis_style(Some(&Diagnosis::Unauthorized(403)));
        assert_eq!(denied.fg, Some(Color::Red));
        assert!(denied.add_modifier.contains(Modifier::BOLD));
    }
}
