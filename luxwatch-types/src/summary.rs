//! Summary statistics over a run of readings.

use crate::NormalizedRecord;

/// Current, mean, max and min light intensity over a record sequence.
///
/// Only defined for a non-empty sequence; [`Summary::from_records`] returns
/// `None` otherwise so callers cannot forget the emptiness check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Light intensity of the most recent record.
    pub current: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Largest value.
    pub max: f64,
    /// Smallest value.
    pub min: f64,
    /// Number of records the statistics were computed over.
    pub count: usize,
}

impl Summary {
    /// Compute statistics for `records`, which must already be in display order.
    pub fn from_records(records: &[NormalizedRecord]) -> Option<Self> {
        let last = records.last()?;

        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for record in records {
            sum += record.light_inte;
            max = max.max(record.light_inte);
            min = min.min(record.light_inte);
        }

        Some(Self {
            current: last.light_inte,
            mean: sum / records.len() as f64,
            max,
            min,
            count: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_summary() {
        assert!(Summary::from_records(&[]).is_none());
    }

    #[test]
    fn test_single_record() {
        let summary = Summary::from_records(&[NormalizedRecord::new("t", 42.0)]).unwrap();
        assert_eq!(summary.current, 42.0);
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.max, 42.0);
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn test_current_is_last_not_max() {
        let records = vec![
            NormalizedRecord::new("1", 10.0),
            NormalizedRecord::new("2", 90.0),
            NormalizedRecord::new("3", 20.0),
        ];
        let summary = Summary::from_records(&records).unwrap();
        assert_eq!(summary.current, 20.0);
        assert_eq!(summary.mean, 40.0);
        assert_eq!(summary.max, 90.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_values_outside_percentage_range_are_kept() {
        let records = vec![NormalizedRecord::new("1", -5.0), NormalizedRecord::new("2", 150.0)];
        let summary = Summary::from_records(&records).unwrap();
        assert_eq!(summary.min, -5.0);
        assert_eq!(summary.max, 150.0);
    }
}
