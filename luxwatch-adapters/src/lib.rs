//! # luxwatch-adapters
//!
//! Fetchers that read raw sensor data out of a remote store.
//!
//! Every adapter implements the [`Fetcher`] trait, so the transport used to
//! reach the database is an interchangeable piece rather than a fork of the
//! dashboard. A fetch never panics and never retries; it returns a
//! [`FetchOutcome`] that says whether data arrived, whether the store is
//! simply empty, or which [`AdapterError`] occurred.
//!
//! ## Supported Stores
//!
//! - **Firebase Realtime Database** (`firebase` feature) - Reads a path through
//!   the REST API (`GET <endpoint>/<path>.json`)
//! - **Static** - Canned outcomes for tests and demos
//!
//! ## Quick Start (Firebase)
//!
//! ```rust,no_run
//! use luxwatch_adapters::{firebase::FirebaseAdapter, FetchOutcome, Fetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = FirebaseAdapter::builder()
//!         .endpoint("https://my-project-default-rtdb.firebaseio.com")
//!         .build()?;
//!
//!     match adapter.fetch("sensor_data").await {
//!         FetchOutcome::Success(raw) => println!("Got {} entries", raw.as_object().map_or(0, |o| o.len())),
//!         FetchOutcome::Empty => println!("No data yet"),
//!         FetchOutcome::Failure(e) => println!("Failed: {}", e),
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fixed;
pub mod outcome;

#[cfg(feature = "firebase")]
pub mod firebase;

use std::fmt::Debug;

use async_trait::async_trait;

pub use error::AdapterError;
pub use fixed::StaticFetcher;
pub use outcome::{classify_status, interpret_body, FetchOutcome};

/// Capability to read one path from a remote key-value store.
///
/// Implementations must bound their own wait time and report every problem
/// through [`FetchOutcome::Failure`]. Retrying is the caller's job.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    /// Read `path` (e.g. `"sensor_data"`) from the store.
    async fn fetch(&self, path: &str) -> FetchOutcome;

    /// Human-readable description of where reads go.
    fn description(&self) -> String;
}
