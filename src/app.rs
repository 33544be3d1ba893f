//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::data::{export, Readings};
use crate::source::DataSource;
use crate::ui::Theme;

/// Rows shown in the detail table.
pub const TABLE_ROWS: usize = 20;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Summary metrics and the light intensity chart.
    Dashboard,
    /// The most recent readings, one per row.
    Table,
    /// What went wrong in the last poll, and how to fix it.
    Diagnostics,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Table,
            View::Table => View::Diagnostics,
            View::Diagnostics => View::Dashboard,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Dashboard => View::Diagnostics,
            View::Table => View::Dashboard,
            View::Diagnostics => View::Table,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Table => "Readings",
            View::Diagnostics => "Diagnostics",
        }
    }
}

/// Startup options for [`App`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub max_data_points: usize,
    pub refresh_interval: Duration,
    pub auto_refresh: bool,
    pub debug: bool,
    pub theme: Theme,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), Theme::dark())
    }
}

impl AppOptions {
    pub fn from_settings(settings: &Settings, theme: Theme) -> Self {
        Self {
            max_data_points: settings.max_data_points,
            refresh_interval: settings.refresh_interval(),
            auto_refresh: settings.auto_refresh,
            debug: settings.debug,
            theme,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub readings: Option<Readings>,
    pub poll_count: u64,
    last_poll: Option<Instant>,

    // Settings, fixed after startup except for the auto-refresh toggle
    pub max_data_points: usize,
    pub refresh_interval: Duration,
    pub auto_refresh: bool,
    pub debug: bool,

    // Navigation state
    pub selected_row: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source`.
    pub fn new(source: Box<dyn DataSource>, options: AppOptions) -> Self {
        Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            source,
            readings: None,
            poll_count: 0,
            last_poll: None,
            max_data_points: options.max_data_points,
            refresh_interval: options.refresh_interval,
            auto_refresh: options.auto_refresh,
            debug: options.debug,
            selected_row: 0,
            theme: options.theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Run one poll cycle: fetch, normalize and replace the current readings.
    ///
    /// Returns true if the cycle produced at least one record.
    pub fn reload_data(&mut self) -> bool {
        let outcome = self.source.fetch();
        let readings = Readings::from_outcome(&outcome, self.max_data_points);
        self.poll_count += 1;
        self.last_poll = Some(Instant::now());

        for entry in &readings.skipped {
            debug!(key = %entry.key, reason = %entry.reason, "skipped entry");
        }
        match readings.diagnosis {
            Some(ref diagnosis) => warn!(
                kind = diagnosis.kind(),
                message = %diagnosis.message(),
                "poll produced no chart"
            ),
            None => debug!(
                records = readings.records.len(),
                valid = readings.valid,
                skipped = readings.skipped.len(),
                "poll complete"
            ),
        }

        let has_records = !readings.is_empty();
        self.readings = Some(readings);
        self.clamp_selection();
        has_records
    }

    /// Whether the refresh interval has passed since the last poll finished.
    ///
    /// The first poll is always due. After that, never due while auto-refresh is off.
    pub fn poll_due(&self, now: Instant) -> bool {
        match self.last_poll {
            None => true,
            Some(_) if !self.auto_refresh => false,
            Some(last) => now.saturating_duration_since(last) >= self.refresh_interval,
        }
    }

    /// Time left until the next automatic poll.
    pub fn next_poll_in(&self, now: Instant) -> Option<Duration> {
        if !self.auto_refresh {
            return None;
        }
        let last = self.last_poll?;
        Some(self.refresh_interval.saturating_sub(now.saturating_duration_since(last)))
    }

    /// Poll now, regardless of the refresh interval.
    pub fn refresh(&mut self) {
        if self.reload_data() {
            self.set_status_message("Refreshed".to_string());
        } else {
            let title = self
                .readings
                .as_ref()
                .and_then(|r| r.diagnosis.as_ref())
                .map(|d| d.title())
                .unwrap_or("No data");
            self.set_status_message(format!("Refreshed: {}", title));
        }
    }

    /// Turn automatic polling on or off.
    pub fn toggle_auto_refresh(&mut self) {
        self.auto_refresh = !self.auto_refresh;
        info!(auto_refresh = self.auto_refresh, "auto refresh toggled");
        let state = if self.auto_refresh { "on" } else { "off" };
        self.set_status_message(format!("Auto refresh {}", state));
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.selected_row = 0;
    }

    /// Number of selectable rows in the current view.
    pub fn row_count(&self) -> usize {
        let Some(ref readings) = self.readings else {
            return 0;
        };
        match self.current_view {
            View::Dashboard => 0,
            View::Table => readings.tail(TABLE_ROWS).len(),
            View::Diagnostics if self.debug => readings.skipped.len(),
            View::Diagnostics => 0,
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.row_count().saturating_sub(1);
        self.selected_row = (self.selected_row + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_row = self.selected_row.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let max = self.row_count().saturating_sub(1);
        self.selected_row = self.selected_row.min(max);
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current readings to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref readings) = self.readings else {
            anyhow::bail!("No data to export");
        };
        export::write_json(readings, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Diagnosis;
    use crate::source::HttpSource;
    use luxwatch_adapters::{AdapterError, FetchOutcome, StaticFetcher};
    use serde_json::json;

    fn app_with(outcomes: Vec<FetchOutcome>) -> App {
        let fetcher = StaticFetcher::new(outcomes);
        let source = HttpSource::new(Box::new(fetcher), "sensor_data").unwrap();
        App::new(Box::new(source), AppOptions::default())
    }

    fn readings_json(n: usize) -> FetchOutcome {
        let map: serde_json::Map<String, serde_json::Value> = (0..n)
            .map(|i| {
                (
                    (1_700_000_000 + i * 60).to_string(),
                    json!({ "light_inte": i as f64 }),
                )
            })
            .collect();
        FetchOutcome::Success(serde_json::Value::Object(map))
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Dashboard.next(), View::Table);
        assert_eq!(View::Diagnostics.next(), View::Dashboard);
        assert_eq!(View::Dashboard.prev(), View::Diagnostics);
        assert_eq!(View::Table.label(), "Readings");
    }

    #[test]
    fn test_reload_success_then_failure() {
        let mut app = app_with(vec![
            readings_json(3),
            FetchOutcome::Failure(AdapterError::Unauthorized(403)),
        ]);

        assert!(app.reload_data());
        let readings = app.readings.as_ref().unwrap();
        assert_eq!(readings.records.len(), 3);
        assert!(readings.diagnosis.is_none());

        assert!(!app.reload_data());
        let readings = app.readings.as_ref().unwrap();
        assert!(readings.records.is_empty());
        assert_eq!(readings.diagnosis, Some(Diagnosis::Unauthorized(403)));
        assert_eq!(app.poll_count, 2);
    }

    #[test]
    fn test_reload_respects_max_points() {
        let mut app = app_with(vec![readings_json(150)]);
        app.max_data_points = 100;
        app.reload_data();
        let readings = app.readings.as_ref().unwrap();
        assert_eq!(readings.records.len(), 100);
        assert_eq!(readings.valid, 150);
        assert_eq!(readings.summary.as_ref().unwrap().current, 149.0);
    }

    #[test]
    fn test_poll_due() {
        let mut app = app_with(vec![FetchOutcome::Empty]);
        app.refresh_interval = Duration::from_secs(5);
        let start = Instant::now();
        assert!(app.poll_due(start));
        app.auto_refresh = false;
        assert!(app.poll_due(start));
        app.auto_refresh = true;

        app.reload_data();
        let now = Instant::now();
        assert!(!app.poll_due(now));
        assert!(app.poll_due(now + Duration::from_secs(5)));
        assert!(app.next_poll_in(now).unwrap() <= Duration::from_secs(5));

        app.toggle_auto_refresh();
        assert!(!app.poll_due(now + Duration::from_secs(60)));
        assert_eq!(app.next_poll_in(now), None);
        assert_eq!(app.get_status_message(), Some("Auto refresh off"));
    }

    #[test]
    fn test_table_selection_bounds() {
        let mut app = app_with(vec![readings_json(30)]);
        app.reload_data();

        // Dashboard has nothing to select.
        app.select_next();
        assert_eq!(app.selected_row, 0);

        app.set_view(View::Table);
        assert_eq!(app.row_count(), TABLE_ROWS);
        app.select_next_n(50);
        assert_eq!(app.selected_row, TABLE_ROWS - 1);
        app.select_prev_n(5);
        assert_eq!(app.selected_row, TABLE_ROWS - 6);
        app.select_first();
        assert_eq!(app.selected_row, 0);
        app.select_last();
        assert_eq!(app.selected_row, TABLE_ROWS - 1);
    }

    #[test]
    fn test_selection_clamped_after_reload() {
        let mut app = app_with(vec![readings_json(20), readings_json(2)]);
        app.reload_data();
        app.set_view(View::Table);
        app.select_last();
        assert_eq!(app.selected_row, 19);

        app.reload_data();
        assert_eq!(app.selected_row, 1);
    }

    #[test]
    fn test_diagnostics_rows_only_in_debug() {
        let mut app = app_with(vec![FetchOutcome::Success(json!({
            "a": 1,
            "b": {"raw": 3},
            "1700000000": {"light_inte": 5},
        }))]);
        app.reload_data();
        app.set_view(View::Diagnostics);
        assert_eq!(app.row_count(), 0);

        app.debug = true;
        assert_eq!(app.row_count(), 2);
    }

    #[test]
    fn test_refresh_sets_status() {
        let mut app = app_with(vec![FetchOutcome::Failure(AdapterError::Timeout)]);
        app.refresh();
        assert_eq!(app.get_status_message(), Some("Refreshed: Request timed out"));
    }

    #[test]
    fn test_export_state() {
        let mut app = app_with(vec![readings_json(2)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        assert!(app.export_state(&path).is_err());

        app.reload_data();
        app.export_state(&path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
    }
}
