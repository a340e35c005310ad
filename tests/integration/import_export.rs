//! Export, backup files and import reconciliation through the app

use super::test_utils::{exercise, memory_app};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;
use trainlog::error::{AppError, ShareError};
use trainlog::share::{FileSink, ShareSink};
use trainlog::training::{TrainingDataMap, TrainingForm};
use trainlog::transfer;

struct RejectingSink;

impl ShareSink for RejectingSink {
    fn share(&self, _title: &str, _body: &str) -> Result<(), ShareError> {
        Err(ShareError::Rejected("share sheet dismissed".to_string()))
    }
}

#[test]
fn test_export_to_file_then_import_elsewhere() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup.json");

    let mut source = memory_app();
    source
        .add_exercise("A", exercise("Supino", 3.0, 10.0, 22.5, 20.0))
        .unwrap();
    source
        .add_exercise("C", exercise("Remada", 4.0, 12.0, 30.0, 32.0))
        .unwrap();
    source.load_all().unwrap();
    let body = source.export(&FileSink::new(&backup)).unwrap();
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), body);

    let mut target = memory_app();
    let imported = target
        .import(&std::fs::read_to_string(&backup).unwrap())
        .unwrap()
        .clone();
    assert_eq!(imported, source.snapshot());

    // Written through to the store, not only cached.
    target.load_all().unwrap();
    assert_eq!(target.data(), &imported);
}

#[test]
fn test_export_envelope_shape() {
    let mut data = TrainingDataMap::new();
    data.insert("A".to_string(), TrainingForm::new());
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

    let body = transfer::serialize_at(&data, at).unwrap();
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["generatedAt"], "2024-03-01T12:30:00.000Z");
    assert_eq!(value["trains"]["A"]["trains"], serde_json::json!([]));
    assert!(body.contains("\n  \"trains\""));
}

#[test]
fn test_failed_share_is_reported() {
    let mut app = memory_app();
    app.load_all().unwrap();
    let err = app.export(&RejectingSink).unwrap_err();
    assert!(matches!(err, AppError::ShareFailed(ref m) if m.contains("share sheet dismissed")));
}

#[test]
fn test_bare_map_import_drops_unknown_contexts() {
    let mut app = memory_app();
    let payload = r#"{
        "A": {"trains": [{"name": "Supino", "reps": 10, "series": 3, "weightActual": 20, "weightBefore": 18}]},
        "Z": {"trains": [{"name": "Ghost"}]}
    }"#;

    let data = app.import(payload).unwrap();
    assert_eq!(data.keys().collect::<Vec<_>>(), ["A", "B", "C"]);
    assert_eq!(data["A"].trains[0].weight_actual, Some(20.0));
    assert!(data["B"].is_empty());
}

#[test]
fn test_import_fills_missing_fields() {
    let mut app = memory_app();
    let payload = r#"{"trains": {"B": {"trains": [{"name": "Prancha"}]}}}"#;

    let data = app.import(payload).unwrap();
    let entry = &data["B"].trains[0];
    assert_eq!(entry.name, "Prancha");
    assert_eq!(entry.reps, None);
    assert_eq!(entry.weight_before, None);
    assert_eq!(entry.observations, "");
}

#[test]
fn test_import_reads_wrongly_typed_fields_as_empty() {
    let mut app = memory_app();
    let payload = r#"{"A": {"trains": [
        {"name": 7, "reps": "12", "series": 8.5, "weightActual": true, "weightBefore": 40, "observations": []},
        {"name": "Remada", "reps": 10}
    ]}}"#;

    let data = app.import(payload).unwrap();
    let first = &data["A"].trains[0];
    assert_eq!(first.name, "");
    assert_eq!(first.reps, None);
    assert_eq!(first.series, Some(8.5));
    assert_eq!(first.weight_actual, None);
    assert_eq!(first.weight_before, Some(40.0));
    assert_eq!(first.observations, "");
    assert_eq!(data["A"].trains[1].reps, Some(10.0));

    let stored = app.load_form("A").unwrap();
    assert_eq!(stored.trains.len(), 2);
    assert_eq!(stored.trains[0].series, Some(8.5));
}

#[test]
fn test_import_replaces_existing_forms() {
    let mut app = memory_app();
    app.add_exercise("A", exercise("Supino", 3.0, 10.0, 20.0, 18.0))
        .unwrap();

    app.import(r#"{"B": {"trains": []}}"#).unwrap();
    assert!(app.form("A").unwrap().is_empty());
    assert!(app.load_form("A").unwrap().is_empty());
}

#[test]
fn test_malformed_import_leaves_state() {
    let mut app = memory_app();
    app.add_exercise("A", exercise("Supino", 3.0, 10.0, 20.0, 18.0))
        .unwrap();

    for payload in ["", "not json", "[1,2]", "[{}]", "42"] {
        assert!(
            matches!(app.import(payload), Err(AppError::InvalidPayload(_))),
            "payload {:?} should be rejected",
            payload
        );
    }
    assert_eq!(app.form("A").unwrap().len(), 1);
}
