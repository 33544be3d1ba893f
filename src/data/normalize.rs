//! Flattening of raw store snapshots into ordered light readings.
//!
//! The store has held readings in two layouts over time, sometimes both at
//! once, so the layout is detected per top-level entry:
//!
//! ```text
//! flat:    { "1700000000": { "light_inte": 42 } }
//! nested:  { "2025-11-19": { "10:20:59": { "light_inte": 39, "raw": 2511 } } }
//! ```
//!
//! Entries that fit neither layout are skipped and listed, never fatal.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

use luxwatch_types::{has_canonical_form, NormalizedRecord, LIGHT_FIELD, RAW_FIELD};

/// Formats tried, in order, on a `"<date> <time>"` composite key.
pub const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// Why an entry did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkipReason {
    /// The value is a scalar or array, not a mapping.
    NotAMapping,
    /// A mapping with no `light_inte` at the level where one was expected.
    MissingLight,
    /// `light_inte` is present but is not a number.
    InvalidLight,
}

impl SkipReason {
    /// Short description for the debug panel.
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::NotAMapping => "value is not an object",
            SkipReason::MissingLight => "no light_inte field",
            SkipReason::InvalidLight => "light_inte is not numeric",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// An entry that was dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Key of the entry (composite `"<date> <time>"` for nested entries).
    pub key: String,
    pub reason: SkipReason,
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    /// Records in chronological order, at most `max_data_points` of them.
    pub records: Vec<NormalizedRecord>,
    /// Entries that produced no record.
    pub skipped: Vec<SkippedEntry>,
    /// Number of usable records before truncation.
    pub valid: usize,
}

/// Flatten a raw snapshot into at most `max_data_points` of its most recent readings.
///
/// `null`, empty objects and any non-object top level yield no records. This
/// function never fails; malformed entries end up in [`Normalized::skipped`].
pub fn normalize(raw: &Value, max_data_points: usize) -> Normalized {
    let mut out = Normalized::default();

    let entries = match raw {
        Value::Object(entries) => entries,
        Value::Null => return out,
        _ => {
            out.skipped.push(SkippedEntry {
                key: String::new(),
                reason: SkipReason::NotAMapping,
            });
            return out;
        }
    };

    for (key, value) in entries {
        normalize_entry(key, value, &mut out);
    }

    out.valid = out.records.len();
    out.records.sort_by(NormalizedRecord::chronological_cmp);

    let excess = out.records.len().saturating_sub(max_data_points);
    out.records.drain(..excess);

    out
}

fn normalize_entry(key: &str, value: &Value, out: &mut Normalized) {
    let Value::Object(fields) = value else {
        out.skip(key, SkipReason::NotAMapping);
        return;
    };

    if fields.contains_key(LIGHT_FIELD) {
        match flat_record(key, fields) {
            Ok(record) => out.records.push(record),
            Err(reason) => out.skip(key, reason),
        }
    } else if fields.values().any(Value::is_object) {
        for (time, inner) in fields {
            let composite = format!("{} {}", key, time);
            match inner {
                Value::Object(inner_fields) => match nested_record(&composite, inner_fields) {
                    Ok(record) => out.records.push(record),
                    Err(reason) => out.skip(&composite, reason),
                },
                _ => out.skip(&composite, SkipReason::NotAMapping),
            }
        }
    } else {
        out.skip(key, SkipReason::MissingLight);
    }
}

impl Normalized {
    fn skip(&mut self, key: &str, reason: SkipReason) {
        self.skipped.push(SkippedEntry {
            key: key.to_string(),
            reason,
        });
    }
}

/// `timestamp -> value` entry. Purely numeric keys are epoch seconds.
fn flat_record(key: &str, fields: &Map<String, Value>) -> Result<NormalizedRecord, SkipReason> {
    let light = light_value(fields)?;
    let record = match parse_epoch_key(key) {
        Some(time) => NormalizedRecord::at(time, light),
        None => NormalizedRecord::new(key, light),
    };
    Ok(with_raw(record, fields))
}

/// Inner entry of a date bucket, keyed by the `"<date> <time>"` composite.
fn nested_record(
    composite: &str,
    fields: &Map<String, Value>,
) -> Result<NormalizedRecord, SkipReason> {
    let light = light_value(fields)?;
    let record = match parse_date_time(composite) {
        Some(time) => NormalizedRecord::at(time, light),
        None => NormalizedRecord::new(composite, light),
    };
    Ok(with_raw(record, fields))
}

fn with_raw(record: NormalizedRecord, fields: &Map<String, Value>) -> NormalizedRecord {
    match fields.get(RAW_FIELD).and_then(numeric) {
        Some(raw) => record.with_raw(raw),
        None => record,
    }
}

fn light_value(fields: &Map<String, Value>) -> Result<f64, SkipReason> {
    let value = fields.get(LIGHT_FIELD).ok_or(SkipReason::MissingLight)?;
    numeric(value).ok_or(SkipReason::InvalidLight)
}

/// Numbers, and strings holding a finite number.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Interpret an all-digit key as Unix epoch seconds (UTC).
///
/// Keys past year 9999 (e.g. millisecond counts) have no canonical
/// timestamp and stay unparsed.
pub fn parse_epoch_key(key: &str) -> Option<NaiveDateTime> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let secs = key.parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.naive_utc())
        .filter(has_canonical_form)
}

/// Strict parse of a composite date and time against [`DATE_TIME_FORMATS`].
pub fn parse_date_time(composite: &str) -> Option<NaiveDateTime> {
    let text = composite.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .filter(has_canonical_form)
}
