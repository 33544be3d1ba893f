//! # luxwatch-types
//!
//! Core types for light-sensor dashboards. This crate defines the normalized
//! reading schema that the luxwatch normalizer produces and the TUI, exporters
//! and any other consumer read.
//!
//! ## Design Goals
//!
//! - **Shape independent**: A [`NormalizedRecord`] looks the same whether the
//!   store kept readings flat (`timestamp -> value`) or bucketed by day
//!   (`date -> time -> value`)
//! - **Optional serialization**: Enable the `serde` feature to export records
//! - **Derived, never stored**: [`Summary`] is recomputed from a record slice
//!
//! ## Features
//!
//! - `serde`: JSON (or any serde format) support for records and summaries
//!
//! ## Example
//!
//! ```rust
//! use luxwatch_types::{NormalizedRecord, Summary};
//!
//! let records = vec![
//!     NormalizedRecord::new("2025-11-19 10:20:58", 40.0),
//!     NormalizedRecord::new("2025-11-19 10:20:59", 38.0).with_raw(2511.0),
//! ];
//!
//! let summary = Summary::from_records(&records).unwrap();
//! assert_eq!(summary.current, 38.0);
//! assert_eq!(summary.mean, 39.0);
//! ```

mod record;
mod summary;

pub use record::*;
pub use summary::*;
