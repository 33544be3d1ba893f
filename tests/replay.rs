//! End-to-end poll cycles against a file on disk.

use std::fs;

use luxwatch::{App, AppOptions, Diagnosis, FileSource, View};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn app_for(path: &std::path::Path) -> App {
    App::new(Box::new(FileSource::new(path)), AppOptions::default())
}

#[test]
fn mixed_layouts_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sensor_data.json");
    fs::write(
        &path,
        r#"{
            "1763547600": {"light_inte": 40},
            "2025-11-19": {
                "10:21:00": {"light_inte": 60, "raw": 2511},
                "10:22:00": {"raw": 2400}
            },
            "junk": 7
        }"#,
    )
    .unwrap();

    let mut app = app_for(&path);
    assert!(app.reload_data());

    let readings = app.readings.as_ref().unwrap();
    let stamps: Vec<&str> = readings.records.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(stamps, vec!["2025-11-19 10:20:00", "2025-11-19 10:21:00"]);
    assert_eq!(readings.records[1].raw, Some(2511.0));

    let summary = readings.summary.as_ref().unwrap();
    assert_eq!(summary.current, 60.0);
    assert_eq!(summary.mean, 50.0);
    assert_eq!(summary.max, 60.0);
    assert_eq!(summary.min, 40.0);

    assert_eq!(readings.skipped.len(), 2);
    assert!(readings.diagnosis.is_none());
}

#[test]
fn recovers_on_next_poll() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sensor_data.json");
    let mut app = app_for(&path);

    // Missing file
    assert!(!app.reload_data());
    assert!(matches!(
        app.readings.as_ref().unwrap().diagnosis,
        Some(Diagnosis::ConnectionError(_))
    ));

    // Not JSON
    fs::write(&path, "<html>oops</html>").unwrap();
    assert!(!app.reload_data());
    assert!(matches!(
        app.readings.as_ref().unwrap().diagnosis,
        Some(Diagnosis::ParseFailure(_))
    ));

    // Empty store
    fs::write(&path, "null").unwrap();
    assert!(!app.reload_data());
    assert_eq!(
        app.readings.as_ref().unwrap().diagnosis,
        Some(Diagnosis::EmptyResult { skipped: 0 })
    );

    // Data arrives
    fs::write(&path, r#"{"1700000000": {"light_inte": 12.5}}"#).unwrap();
    assert!(app.reload_data());
    assert_eq!(app.readings.as_ref().unwrap().summary.as_ref().unwrap().current, 12.5);
    assert_eq!(app.poll_count, 4);
}

#[test]
fn export_from_app() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sensor_data.json");
    fs::write(&path, r#"{"1700000000": {"light_inte": 1}, "1700000060": {"light_inte": 3}}"#)
        .unwrap();

    let mut app = app_for(&path);
    app.reload_data();
    app.set_view(View::Table);
    assert_eq!(app.row_count(), 2);

    let out = dir.path().join("export.json");
    app.export_state(&out).unwrap();
    let exported: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(exported["summary"]["mean"], 2.0);
    assert_eq!(exported["valid_records"], 2);
    assert_eq!(exported["diagnosis"], serde_json::Value::Null);
}
