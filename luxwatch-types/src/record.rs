//! The normalized light reading.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDateTime};

/// Field holding the light intensity percentage in a stored value object.
pub const LIGHT_FIELD: &str = "light_inte";

/// Field holding the unscaled sensor reading in a stored value object.
pub const RAW_FIELD: &str = "raw";

/// Canonical rendering of a parsed reading time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether `time` renders as a four-digit-year canonical timestamp.
///
/// Outside years 0000-9999 the rendering gains a sign and extra digits and
/// its text order no longer follows time order.
pub fn has_canonical_form(time: &NaiveDateTime) -> bool {
    (0..=9999).contains(&time.year())
}

/// A single light observation, flattened out of whatever shape the store used.
///
/// `timestamp` is the canonical `YYYY-MM-DD HH:MM:SS` form when a time could
/// be parsed from the store keys, otherwise the key text exactly as stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedRecord {
    /// Display timestamp (canonical or original key).
    pub timestamp: String,

    /// Light intensity, a percentage by convention (not range checked).
    pub light_inte: f64,

    /// Unscaled sensor reading, when the device reported one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub raw: Option<f64>,

    /// Reading time, when the key could be interpreted as one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub parsed_time: Option<NaiveDateTime>,
}

impl NormalizedRecord {
    /// Create a record with an unparsed timestamp.
    pub fn new(timestamp: impl Into<String>, light_inte: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            light_inte,
            raw: None,
            parsed_time: None,
        }
    }

    /// Create a record at a known time. The timestamp is rendered canonically.
    pub fn at(time: NaiveDateTime, light_inte: f64) -> Self {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            light_inte,
            raw: None,
            parsed_time: Some(time),
        }
    }

    /// Attach the unscaled sensor reading.
    pub fn with_raw(mut self, raw: f64) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Seconds since the Unix epoch of the parsed time, if any.
    pub fn epoch_seconds(&self) -> Option<f64> {
        self.parsed_time.map(|t| t.and_utc().timestamp() as f64)
    }

    /// Chronological ordering used by the normalizer.
    ///
    /// Compares timestamp text, then parsed time. Canonical timestamps sort
    /// like the times they render, so parsed records (see
    /// [`has_canonical_form`]) come out in time order, sub-second ties
    /// included, and unparsed keys fall back to text order. A single key for
    /// every pairing keeps this a total order.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.parsed_time.cmp(&other.parsed_time))
    }
}
