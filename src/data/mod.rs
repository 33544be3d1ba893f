//! Data models and processing for sensor snapshots.
//!
//! This module turns the raw JSON a fetch returns into the ordered readings,
//! summary statistics and diagnosis the UI displays.
//!
//! ## Submodules
//!
//! - [`normalize`]: Shape detection and flattening of raw snapshots
//! - [`diagnosis`]: Closed classification of failed or empty poll cycles
//! - [`readings`]: The per-cycle bundle ([`Readings`]) handed to the UI
//! - [`export`]: JSON export and plain-text summaries
//!
//! ## Data Flow
//!
//! ```text
//! FetchOutcome (raw JSON or failure)
//!        │
//!        ▼
//! Readings::from_outcome()
//!        │
//!        ├──▶ normalize() ──▶ NormalizedRecord[] ──▶ Summary
//!        │
//!        └──▶ Diagnosis::from_outcome()
//! ```

pub mod diagnosis;
pub mod export;
pub mod normalize;
pub mod readings;

pub use diagnosis::Diagnosis;
pub use normalize::{normalize, Normalized, SkipReason, SkippedEntry};
pub use readings::{Readings, XAxis};
