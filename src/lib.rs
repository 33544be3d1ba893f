//! # luxwatch
//!
//! A terminal dashboard for light-sensor readings stored in a Firebase
//! Realtime Database.
//!
//! The dashboard polls one database path, normalizes whatever record layouts
//! it finds there, and renders summary metrics, a time-series chart, a table
//! of recent readings and a diagnostics panel.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Poll loop                            │
//! │  ┌─────────┐    ┌───────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │ source  │───▶│   data    │───▶│   app   │───▶│    ui    │ │
//! │  │ (fetch) │    │(normalize)│    │ (state) │    │ (render) │ │
//! │  └────┬────┘    └───────────┘    └─────────┘    └──────────┘ │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  HttpSource(Fetcher) | FileSource                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: The [`DataSource`] trait, an HTTP source over any
//!   [`Fetcher`](luxwatch_adapters::Fetcher) and a file source for offline replay
//! - **[`data`]**: Normalization, diagnosis and export of one poll cycle
//! - **[`app`]**: Application state, polling schedule and navigation
//! - **[`config`]**: Layered settings (defaults, secrets, file, environment, flags)
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the database named in .luxwatch/secrets.toml
//! luxwatch
//!
//! # Watch a specific database, polling every 2 seconds
//! luxwatch --url https://my-project-default-rtdb.firebaseio.com -r 2
//!
//! # Print one summary and exit
//! luxwatch --once
//! ```
//!
//! ### As a library
//!
//! ```
//! use luxwatch::{App, AppOptions, HttpSource};
//! use luxwatch_adapters::{FetchOutcome, StaticFetcher};
//! use serde_json::json;
//!
//! let fetcher = StaticFetcher::new([FetchOutcome::Success(json!({
//!     "1700000000": { "light_inte": 42 }
//! }))]);
//! let source = HttpSource::new(Box::new(fetcher), "sensor_data").unwrap();
//!
//! let mut app = App::new(Box::new(source), AppOptions::default());
//! app.reload_data();
//! assert_eq!(app.readings.unwrap().summary.unwrap().current, 42.0);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, AppOptions, View};
pub use config::Settings;
pub use data::{Diagnosis, Readings};
pub use source::{DataSource, FileSource, HttpSource};
