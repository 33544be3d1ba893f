//! The processed result of one poll cycle.

use std::time::Instant;

use chrono::{DateTime, Local};
use luxwatch_adapters::FetchOutcome;
use luxwatch_types::{NormalizedRecord, Summary};

use super::diagnosis::Diagnosis;
use super::normalize::{normalize, SkippedEntry};

/// How chart x values were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    /// Unix epoch seconds of each record's parsed time.
    Time,
    /// Position of the record in the sequence.
    Index,
}

/// Everything the UI shows for one poll cycle.
///
/// Rebuilt from scratch each cycle; nothing carries over from the previous one.
#[derive(Debug, Clone)]
pub struct Readings {
    pub records: Vec<NormalizedRecord>,
    pub summary: Option<Summary>,
    pub skipped: Vec<SkippedEntry>,
    /// Usable records before truncation to the configured maximum.
    pub valid: usize,
    pub diagnosis: Option<Diagnosis>,
    pub last_updated: Instant,
    pub fetched_at: DateTime<Local>,
}

impl Readings {
    /// Normalize a fetch outcome into displayable readings.
    pub fn from_outcome(outcome: &FetchOutcome, max_data_points: usize) -> Self {
        let normalized = match outcome {
            FetchOutcome::Success(raw) => normalize(raw, max_data_points),
            FetchOutcome::Empty | FetchOutcome::Failure(_) => Default::default(),
        };

        let diagnosis = Diagnosis::from_outcome(
            outcome,
            normalized.records.len(),
            normalized.skipped.len(),
        );

        Self {
            summary: Summary::from_records(&normalized.records),
            records: normalized.records,
            skipped: normalized.skipped,
            valid: normalized.valid,
            diagnosis,
            last_updated: Instant::now(),
            fetched_at: Local::now(),
        }
    }

    /// Whether there is anything to chart.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent `n` records.
    pub fn tail(&self, n: usize) -> &[NormalizedRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Chart points as `(x, light)`.
    ///
    /// Times are used only when every record has one; a partially timed
    /// series is plotted by position so the axis stays monotonic.
    pub fn chart_points(&self) -> (XAxis, Vec<(f64, f64)>) {
        let times: Option<Vec<f64>> = self.records.iter().map(|r| r.epoch_seconds()).collect();
        match times {
            Some(times) if !times.is_empty() => (
                XAxis::Time,
                times
                    .into_iter()
                    .zip(&self.records)
                    .map(|(t, r)| (t, r.light_inte))
                    .collect(),
            ),
            _ => (
                XAxis::Index,
                self.records
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (i as f64, r.light_inte))
                    .collect(),
            ),
        }
    }
}
