//! Firebase Realtime Database adapter using the REST API.
//!
//! Every database location is readable as JSON by appending `.json` to its
//! URL, so a read of `sensor_data` is a single
//! `GET https://<project>-default-rtdb.firebaseio.com/sensor_data.json`.
//!
//! ## Responses
//!
//! - `200` with `null` or `{}`: the location holds no data yet ([`FetchOutcome::Empty`])
//! - `200` with a JSON document: [`FetchOutcome::Success`]
//! - `401`/`403`: database rules deny the read ([`AdapterError::Unauthorized`])
//! - anything else: [`AdapterError::Http`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use luxwatch_adapters::{firebase::FirebaseAdapter, Fetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = FirebaseAdapter::builder()
//!         .endpoint("https://my-project-default-rtdb.firebaseio.com")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let outcome = adapter.fetch("sensor_data").await;
//!     println!("{}", outcome.label());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{classify_status, interpret_body, AdapterError, FetchOutcome, Fetcher};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Firebase Realtime Database adapter.
#[derive(Debug, Clone)]
pub struct FirebaseAdapter {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl FirebaseAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> FirebaseAdapterBuilder {
        FirebaseAdapterBuilder::default()
    }

    /// The database endpoint, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// REST URL for a database path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}.json", self.endpoint, path.trim_matches('/'))
    }

    async fn read(&self, path: &str) -> Result<Value, AdapterError> {
        let url = self.url_for(path);
        debug!(%url, "reading database path");

        let response = self.client.get(&url).send().await?;

        let status = response.status().as_u16();
        if let Some(err) = classify_status(status) {
            return Err(err);
        }

        let body = response.text().await?;
        match interpret_body(&body) {
            FetchOutcome::Success(value) => Ok(value),
            FetchOutcome::Empty => Ok(Value::Null),
            FetchOutcome::Failure(err) => Err(err),
        }
    }
}

#[async_trait]
impl Fetcher for FirebaseAdapter {
    async fn fetch(&self, path: &str) -> FetchOutcome {
        let outcome = FetchOutcome::from(self.read(path).await);
        if let FetchOutcome::Failure(ref err) = outcome {
            warn!(endpoint = %self.endpoint, path, error = %err, "database read failed");
        }
        outcome
    }

    fn description(&self) -> String {
        format!("firebase: {}", self.endpoint)
    }
}

/// Builder for FirebaseAdapter.
#[derive(Debug, Default)]
pub struct FirebaseAdapterBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    no_proxy: bool,
}

impl FirebaseAdapterBuilder {
    /// Set the database URL (e.g., "https://my-project-default-rtdb.firebaseio.com").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<FirebaseAdapter, AdapterError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let mut builder = Client::builder().timeout(timeout);
        if self.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| AdapterError::Unknown(format!("failed to build HTTP client: {}", e)))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "http://localhost:9000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(FirebaseAdapter {
            client,
            endpoint,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let adapter = FirebaseAdapter::builder().build().unwrap();
        assert_eq!(adapter.endpoint(), "http://localhost:9000");
        assert_eq!(adapter.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_custom() {
        let adapter = FirebaseAdapter::builder()
            .endpoint("https://demo-default-rtdb.firebaseio.com/")
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();

        assert_eq!(adapter.endpoint(), "https://demo-default-rtdb.firebaseio.com");
        assert_eq!(adapter.timeout(), Duration::from_secs(3));
        assert_eq!(
            adapter.description(),
            "firebase: https://demo-default-rtdb.firebaseio.com"
        );
    }

    #[test]
    fn test_url_for() {
        let adapter = FirebaseAdapter::builder()
            .endpoint("https://demo.firebaseio.com/")
            .build()
            .unwrap();
        assert_eq!(
            adapter.url_for("sensor_data"),
            "https://demo.firebaseio.com/sensor_data.json"
        );
        assert_eq!(
            adapter.url_for("/devices/lamp/"),
            "https://demo.firebaseio.com/devices/lamp.json"
        );
    }
}
