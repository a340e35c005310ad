//! Context naming and registry persistence

use super::test_utils::memory_app;
use std::sync::Arc;
use trainlog::error::AppError;
use trainlog::registry::{next_context_name, ContextRegistry};
use trainlog::store::{KeyValueStore, MemoryStore, REGISTRY_KEY};

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_letters_follow_count_not_gaps() {
    assert_eq!(next_context_name(&ids(&[])), "A");
    assert_eq!(next_context_name(&ids(&["A", "B", "C"])), "D");
    assert_eq!(next_context_name(&ids(&["A", "C"])), "D");
    assert_eq!(next_context_name(&ids(&["B"])), "C");
}

#[test]
fn test_numbered_names_after_alphabet() {
    let alphabet: Vec<String> = ('A'..='Z').map(|c| c.to_string()).collect();
    assert_eq!(next_context_name(&alphabet), "Treino 27");

    let mut taken = alphabet.clone();
    taken.push("Treino 28".to_string());
    assert_eq!(next_context_name(&taken), "Treino 29");
}

#[test]
fn test_app_adds_until_numbered() {
    let mut app = memory_app();
    for _ in 0..23 {
        app.add_context().unwrap();
    }
    assert_eq!(app.context_ids().last().unwrap(), "Z");
    assert_eq!(app.add_context().unwrap(), "Treino 27");
    assert_eq!(app.context_ids().len(), 27);
}

#[test]
fn test_duplicate_and_missing_contexts() {
    let mut app = memory_app();
    assert!(matches!(
        app.add_named_context("B"),
        Err(AppError::DuplicateContext(ref c)) if c == "B"
    ));
    assert!(matches!(
        app.remove_context("Q"),
        Err(AppError::ContextNotFound(ref c)) if c == "Q"
    ));
    assert_eq!(app.context_ids(), ["A", "B", "C"]);
}

#[test]
fn test_unreadable_registry_falls_back_to_defaults() {
    let store = MemoryStore::new();
    store.set(REGISTRY_KEY, "{\"A\": 1}").unwrap();
    let registry = ContextRegistry::load(&store, &ids(&["A", "B"])).unwrap();
    assert_eq!(registry.ids(), ["A", "B"]);

    store.set(REGISTRY_KEY, "[]").unwrap();
    let registry = ContextRegistry::load(&store, &ids(&["A"])).unwrap();
    assert_eq!(registry.ids(), ["A"]);
}

#[test]
fn test_registry_saved_as_json_array() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = ContextRegistry::new(ids(&["A", "B"]));
    registry.add_next();
    registry.save(store.as_ref()).unwrap();
    assert_eq!(
        store.get(REGISTRY_KEY).unwrap().as_deref(),
        Some(r#"["A","B","C"]"#)
    );
}
