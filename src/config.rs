//! Runtime settings.
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. The secrets file (`[firebase] database_url`), if present
//! 3. An optional settings file (TOML, YAML or JSON; top-level keys)
//! 4. `LUXWATCH_*` environment variables (e.g. `LUXWATCH_DATABASE_URL`)
//! 5. Command-line flags, applied with [`Settings::apply`]
//!
//! Settings are fixed once the dashboard starts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Database used when no URL is configured anywhere.
pub const DEFAULT_DATABASE_URL: &str = "https://cambienanh-sang-default-rtdb.firebaseio.com";

/// Where the secrets file is looked for by default.
pub const DEFAULT_SECRETS_PATH: &str = ".luxwatch/secrets.toml";

/// Database path holding the sensor readings.
pub const DEFAULT_DATA_PATH: &str = "sensor_data";

/// Allowed refresh interval, seconds.
pub const REFRESH_RANGE: std::ops::RangeInclusive<u64> = 1..=60;

/// Allowed number of retained records.
pub const MAX_POINTS_RANGE: std::ops::RangeInclusive<usize> = 10..=500;

/// Allowed request timeout, seconds.
pub const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=120;

/// Resolved dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the realtime database.
    pub database_url: String,
    /// Path read on every poll (`<database_url>/<data_path>.json`).
    pub data_path: String,
    /// Seconds between the end of one poll and the start of the next.
    pub refresh_interval_secs: u64,
    /// Most recent records kept for display.
    pub max_data_points: usize,
    /// Request timeout, seconds.
    pub timeout_secs: u64,
    /// Poll automatically; when off, only manual refreshes fetch.
    pub auto_refresh: bool,
    /// Show the debug panel and write a log file.
    pub debug: bool,
    /// Log destination when `debug` is on.
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            data_path: DEFAULT_DATA_PATH.to_string(),
            refresh_interval_secs: 5,
            max_data_points: 100,
            timeout_secs: 10,
            auto_refresh: true,
            debug: false,
            log_file: PathBuf::from("/tmp/luxwatch-debug.log"),
        }
    }
}

/// Command-line values that take precedence over every file and variable.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_url: Option<String>,
    pub data_path: Option<String>,
    pub refresh_interval_secs: Option<u64>,
    pub max_data_points: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub no_auto_refresh: bool,
    pub debug: bool,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the secrets file, optional settings file and environment.
    ///
    /// A missing secrets file is not an error; a missing settings file is.
    pub fn load(secrets_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(secrets_path, config_path, Environment::with_prefix("LUXWATCH"))
    }

    fn load_with_env(
        secrets_path: &Path,
        config_path: Option<&Path>,
        env: Environment,
    ) -> Result<Self> {
        let database_url = read_secret_url(secrets_path)?
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let mut builder = Config::builder().set_default("database_url", database_url)?;
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(env.try_parsing(true))
            .build()
            .context("failed to read settings")?;

        let settings: Settings = config.try_deserialize().context("invalid settings")?;
        Ok(settings)
    }

    /// Apply command-line overrides.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.database_url {
            self.database_url = url;
        }
        if let Some(path) = overrides.data_path {
            self.data_path = path;
        }
        if let Some(secs) = overrides.refresh_interval_secs {
            self.refresh_interval_secs = secs;
        }
        if let Some(n) = overrides.max_data_points {
            self.max_data_points = n;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        if overrides.no_auto_refresh {
            self.auto_refresh = false;
        }
        if overrides.debug {
            self.debug = true;
        }
        if let Some(path) = overrides.log_file {
            self.log_file = path;
        }
        self
    }

    /// Check ranges and required values.
    pub fn validate(&self) -> Result<()> {
        let url = self.database_url.trim();
        ensure!(!url.is_empty(), "database_url must not be empty");
        ensure!(
            url.starts_with("http://") || url.starts_with("https://"),
            "database_url must start with http:// or https:// (got {:?})",
            url
        );
        ensure!(
            !self.data_path.trim_matches('/').is_empty(),
            "data_path must not be empty"
        );
        ensure!(
            REFRESH_RANGE.contains(&self.refresh_interval_secs),
            "refresh_interval_secs must be between {} and {} (got {})",
            REFRESH_RANGE.start(),
            REFRESH_RANGE.end(),
            self.refresh_interval_secs
        );
        ensure!(
            MAX_POINTS_RANGE.contains(&self.max_data_points),
            "max_data_points must be between {} and {} (got {})",
            MAX_POINTS_RANGE.start(),
            MAX_POINTS_RANGE.end(),
            self.max_data_points
        );
        ensure!(
            TIMEOUT_RANGE.contains(&self.timeout_secs),
            "timeout_secs must be between {} and {} (got {})",
            TIMEOUT_RANGE.start(),
            TIMEOUT_RANGE.end(),
            self.timeout_secs
        );
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[firebase] database_url` from the secrets file, if the file exists.
fn read_secret_url(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let secrets = Config::builder()
        .add_source(File::from(path))
        .build()
        .with_context(|| format!("failed to read secrets file {}", path.display()))?;
    Ok(secrets
        .get_string("firebase.database_url")
        .ok()
        .filter(|url| !url.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, Builder};

    fn no_env() -> Environment {
        Environment::with_prefix("LUXWATCH").source(Some(config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix("LUXWATCH").source(Some(map))
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = tempdir().unwrap();
        let settings =
            Settings::load_with_env(&dir.path().join("missing.toml"), None, no_env()).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.validate().is_ok());
        assert_eq!(settings.refresh_interval(), Duration::from_secs(5));
        assert_eq!(settings.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_secrets_file_sets_url() {
        let mut secrets = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            secrets,
            "[firebase]\napi_key = \"abc\"\ndatabase_url = \"https://mine-default-rtdb.firebaseio.com\""
        )
        .unwrap();

        let settings = Settings::load_with_env(secrets.path(), None, no_env()).unwrap();
        assert_eq!(settings.database_url, "https://mine-default-rtdb.firebaseio.com");
    }

    #[test]
    fn test_settings_file_and_env_layering() {
        let mut secrets = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(secrets, "[firebase]\ndatabase_url = \"https://secret.firebaseio.com\"").unwrap();

        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "database_url = \"https://file.firebaseio.com\"\nrefresh_interval_secs = 15\nmax_data_points = 250"
        )
        .unwrap();

        let settings = Settings::load_with_env(
            secrets.path(),
            Some(file.path()),
            env(&[("LUXWATCH_MAX_DATA_POINTS", "300"), ("LUXWATCH_DEBUG", "true")]),
        )
        .unwrap();

        assert_eq!(settings.database_url, "https://file.firebaseio.com");
        assert_eq!(settings.refresh_interval_secs, 15);
        assert_eq!(settings.max_data_points, 300);
        assert!(settings.debug);
    }

    #[test]
    fn test_missing_settings_file_is_error() {
        let dir = tempdir().unwrap();
        let result = Settings::load_with_env(
            &dir.path().join("missing.toml"),
            Some(&dir.path().join("settings.toml")),
            no_env(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default().apply(Overrides {
            database_url: Some("http://localhost:9000".into()),
            refresh_interval_secs: Some(2),
            max_data_points: Some(10),
            no_auto_refresh: true,
            debug: true,
            ..Default::default()
        });
        assert_eq!(settings.database_url, "http://localhost:9000");
        assert_eq!(settings.refresh_interval_secs, 2);
        assert_eq!(settings.max_data_points, 10);
        assert!(!settings.auto_refresh);
        assert!(settings.debug);
        assert_eq!(settings.data_path, DEFAULT_DATA_PATH);
    }

    #[test]
    fn test_validate_bounds() {
        let ok = Settings::default();
        assert!(ok.validate().is_ok());

        let cases = [
            Settings { refresh_interval_secs: 0, ..ok.clone() },
            Settings { refresh_interval_secs: 61, ..ok.clone() },
            Settings { max_data_points: 9, ..ok.clone() },
            Settings { max_data_points: 501, ..ok.clone() },
            Settings { timeout_secs: 0, ..ok.clone() },
            Settings { database_url: "".into(), ..ok.clone() },
            Settings { database_url: "ftp://x".into(), ..ok.clone() },
            Settings { data_path: "/".into(), ..ok.clone() },
        ];
        for settings in cases {
            assert!(settings.validate().is_err(), "{:?} should be rejected", settings);
        }

        let edges = [
            Settings { refresh_interval_secs: 1, max_data_points: 10, ..ok.clone() },
            Settings { refresh_interval_secs: 60, max_data_points: 500, ..ok.clone() },
        ];
        for settings in edges {
            assert!(settings.validate().is_ok());
        }
    }

    #[test]
    fn test_error_names_field() {
        let err = Settings {
            max_data_points: 1000,
            ..Settings::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("max_data_points"));
    }
}
