//! Network data source backed by an async [`Fetcher`].

use std::time::Duration;

use anyhow::Result;
use luxwatch_adapters::firebase::FirebaseAdapter;
use luxwatch_adapters::{FetchOutcome, Fetcher};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::DataSource;

/// A data source that reads one database path through a [`Fetcher`].
///
/// The source owns a current-thread tokio runtime and blocks on each fetch,
/// so the poll loop stays single threaded and a read that times out simply
/// ends the cycle.
///
/// # Example
///
/// ```
/// use luxwatch::HttpSource;
/// use luxwatch_adapters::{FetchOutcome, StaticFetcher};
///
/// let fetcher = StaticFetcher::new([FetchOutcome::Empty]);
/// let source = HttpSource::new(Box::new(fetcher), "sensor_data").unwrap();
/// ```
#[derive(Debug)]
pub struct HttpSource {
    runtime: Runtime,
    fetcher: Box<dyn Fetcher>,
    path: String,
    description: String,
}

impl HttpSource {
    /// Wrap any fetcher. `path` is the database location read on every poll.
    pub fn new(fetcher: Box<dyn Fetcher>, path: impl Into<String>) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let path = path.into();
        let description = format!("{}/{}", fetcher.description(), path);
        Ok(Self {
            runtime,
            fetcher,
            path,
            description,
        })
    }

    /// Read `path` from a Firebase Realtime Database over REST.
    pub fn firebase(endpoint: &str, path: &str, timeout: Duration) -> Result<Self> {
        let adapter = FirebaseAdapter::builder()
            .endpoint(endpoint)
            .timeout(timeout)
            .build()?;
        Self::new(Box::new(adapter), path)
    }

    /// The database path read on every poll.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl DataSource for HttpSource {
    fn fetch(&mut self) -> FetchOutcome {
        let outcome = self.runtime.block_on(self.fetcher.fetch(&self.path));
        debug!(path = %self.path, outcome = outcome.label(), "fetch complete");
        outcome
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxwatch_adapters::{AdapterError, StaticFetcher};
    use serde_json::json;

    #[test]
    fn test_http_source_description() {
        let source = HttpSource::new(Box::new(StaticFetcher::default()), "sensor_data").unwrap();
        assert_eq!(source.description(), "static/sensor_data");
        assert_eq!(source.path(), "sensor_data");
    }

    #[test]
    fn test_http_source_fetches_in_sequence() {
        let fetcher = StaticFetcher::new([
            FetchOutcome::Failure(AdapterError::Timeout),
            FetchOutcome::Success(json!({"1": {"light_inte": 4}})),
        ]);
        let mut source = HttpSource::new(Box::new(fetcher), "sensor_data").unwrap();

        assert_eq!(source.fetch(), FetchOutcome::Failure(AdapterError::Timeout));
        assert!(matches!(source.fetch(), FetchOutcome::Success(_)));
    }

    #[test]
    fn test_firebase_source_description() {
        let source = HttpSource::firebase(
            "https://demo-default-rtdb.firebaseio.com/",
            "sensor_data",
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            source.description(),
            "firebase: https://demo-default-rtdb.firebaseio.com/sensor_data"
        );
    }
}
