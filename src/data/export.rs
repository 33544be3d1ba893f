//! JSON export and plain-text summaries of a poll cycle.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use super::Readings;

/// Build the export document for a poll cycle.
pub fn to_json(readings: &Readings) -> Value {
    let diagnosis = readings.diagnosis.as_ref().map(|d| {
        json!({
            "kind": d.kind(),
            "title": d.title(),
            "message": d.message(),
            "remediation": d.remediation(),
        })
    });

    let skipped: Vec<Value> = readings
        .skipped
        .iter()
        .map(|s| json!({ "key": s.key, "reason": s.reason.describe() }))
        .collect();

    json!({
        "fetched_at": readings.fetched_at.to_rfc3339(),
        "summary": readings.summary,
        "valid_records": readings.valid,
        "records": readings.records,
        "skipped": skipped,
        "diagnosis": diagnosis,
    })
}

/// Write the export document to `path` as pretty-printed JSON.
pub fn write_json(readings: &Readings, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_json(readings))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Human-readable report, as printed by `--once`.
pub fn summary_text(readings: &Readings) -> String {
    let mut out = String::new();

    if let Some(ref summary) = readings.summary {
        let _ = writeln!(
            out,
            "Current {:.1}% | Mean {:.1}% | Max {:.1}% | Min {:.1}% ({} records)",
            summary.current, summary.mean, summary.max, summary.min, summary.count
        );
        if let Some(last) = readings.records.last() {
            let _ = writeln!(out, "Latest reading: {}", last.timestamp);
        }
    }

    if let Some(ref diagnosis) = readings.diagnosis {
        let _ = writeln!(out, "{}: {}", diagnosis.title(), diagnosis.message());
        for step in diagnosis.remediation() {
            let _ = writeln!(out, "  - {}", step);
        }
    }

    if !readings.skipped.is_empty() {
        let _ = writeln!(out, "Skipped {} malformed entries", readings.skipped.len());
    }

    out
}
