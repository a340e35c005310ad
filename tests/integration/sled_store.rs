//! Training data persisted through the sled store

use super::test_utils::{app_over, exercise};
use std::sync::Arc;
use tempfile::TempDir;
use trainlog::store::{training_key, KeyValueStore, SledStore, TRAINING_KEY_PREFIX};

#[test]
fn test_trainings_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store");

    {
        let store = Arc::new(SledStore::new(&path).unwrap());
        let mut app = app_over(store);
        app.add_context().unwrap();
        app.add_exercise("D", exercise("Desenvolvimento", 3.0, 10.0, 14.0, 12.0))
            .unwrap();
    }

    let store = Arc::new(SledStore::new(&path).unwrap());
    let mut app = app_over(store.clone());
    assert_eq!(app.context_ids(), ["A", "B", "C", "D"]);
    let data = app.load_all().unwrap();
    assert_eq!(data["D"].trains[0].name, "Desenvolvimento");
    assert_eq!(
        store.keys_with_prefix(TRAINING_KEY_PREFIX).unwrap(),
        vec![training_key("D")]
    );
}

#[test]
fn test_import_writes_every_context() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(SledStore::new(temp.path().join("store")).unwrap());
    let mut app = app_over(store.clone());

    app.import(r#"{"A": {"trains": [{"name": "Supino"}]}}"#)
        .unwrap();

    for ctx in ["A", "B", "C"] {
        assert!(store.contains(&training_key(ctx)).unwrap(), "{} missing", ctx);
    }
    let raw = store.get(&training_key("B")).unwrap().unwrap();
    assert_eq!(raw, r#"{"trains":[]}"#);
}

#[test]
fn test_removed_context_deletes_its_key() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(SledStore::new(temp.path().join("store")).unwrap());
    let mut app = app_over(store.clone());
    app.add_exercise("C", exercise("Rosca", 3.0, 12.0, 10.0, 10.0))
        .unwrap();

    app.remove_context("C").unwrap();
    assert!(!store.contains(&training_key("C")).unwrap());
}
