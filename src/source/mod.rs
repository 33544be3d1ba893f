//! Data source abstraction for the poll loop.
//!
//! A [`DataSource`] performs one blocking read per call. The poll loop calls
//! it, normalizes the outcome, renders, waits for the refresh interval and
//! calls it again, so reads never overlap.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use std::fmt::Debug;

use luxwatch_adapters::FetchOutcome;

/// Trait for reading sensor snapshots from various sources.
///
/// # Example
///
/// ```
/// use luxwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("sensor_data.json");
/// let outcome = source.fetch();
/// println!("{}: {}", source.description(), outcome.label());
/// ```
pub trait DataSource: Send + Debug {
    /// Read the current snapshot.
    ///
    /// Blocks for at most the source's own timeout and never panics; every
    /// problem is reported as [`FetchOutcome::Failure`].
    fn fetch(&mut self) -> FetchOutcome;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
