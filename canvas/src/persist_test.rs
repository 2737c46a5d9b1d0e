#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Point;

struct BrokenStorage;

impl KeyValueStorage for BrokenStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Err(PersistError::Storage("SecurityError".into()))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Storage("QuotaExceededError".into()))
    }
}

fn sample_store() -> CardStore {
    let mut store = CardStore::new();
    store.add_card("# one", Point::new(1.0, 2.0));
    store.add_card("two", Point::new(-30.5, 400.0));
    store
}

// =============================================================
// decode_cards validation
// =============================================================

#[test]
fn decode_accepts_valid_blob() {
    let raw = r##"[{"id":"a","text":"# hi","position":{"x":1,"y":2.5},"width":384}]"##;
    let cards = decode_cards(raw).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, "a");
    assert_eq!(cards[0].position, Point::new(1.0, 2.5));
    assert_eq!(cards[0].width, 384.0);
}

#[test]
fn decode_accepts_empty_array() {
    assert!(decode_cards("[]").unwrap().is_empty());
}

#[test]
fn decode_ignores_unknown_keys() {
    let raw = r#"[{"id":"a","text":"","position":{"x":0,"y":0},"width":10,"color":"red"}]"#;
    assert_eq!(decode_cards(raw).unwrap().len(), 1);
}

#[test]
fn decode_rejects_non_json() {
    assert!(matches!(decode_cards("not json"), Err(PersistError::Json(_))));
}

#[test]
fn decode_rejects_empty_object() {
    assert!(matches!(decode_cards("{}"), Err(PersistError::Schema(_))));
}

#[test]
fn decode_rejects_missing_width() {
    let raw = r#"[{"id":"a","text":"","position":{"x":0,"y":0}}]"#;
    assert!(matches!(decode_cards(raw), Err(PersistError::Schema(_))));
}

#[test]
fn decode_rejects_numeric_id() {
    let raw = r#"[{"id":7,"text":"","position":{"x":0,"y":0},"width":10}]"#;
    assert!(matches!(decode_cards(raw), Err(PersistError::Schema(_))));
}

#[test]
fn decode_rejects_string_coordinates() {
    let raw = r#"[{"id":"a","text":"","position":{"x":"0","y":0},"width":10}]"#;
    assert!(matches!(decode_cards(raw), Err(PersistError::Schema(_))));
}

// =============================================================
// load / save
// =============================================================

#[test]
fn save_then_load_restores_cards() {
    let store = sample_store();
    let mut storage = MemoryStorage::new();
    save(&mut storage, &store).unwrap();

    let mut restored = CardStore::new();
    assert!(load(&storage, &mut restored).unwrap());
    assert_eq!(restored.cards(), store.cards());
}

#[test]
fn save_writes_under_storage_key() {
    let store = sample_store();
    let mut storage = MemoryStorage::new();
    save(&mut storage, &store).unwrap();
    let raw = storage.get_item(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.starts_with('['));
    assert!(raw.contains("\"# one\""));
}

#[test]
fn save_excludes_ai_cards() {
    let mut store = CardStore::new();
    store.add_ai_card("prompt", Point::new(0.0, 0.0));
    let mut storage = MemoryStorage::new();
    save(&mut storage, &store).unwrap();
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn load_with_missing_key_leaves_store_untouched() {
    let mut store = sample_store();
    let before = store.cards().to_vec();
    let storage = MemoryStorage::new();
    assert!(!load(&storage, &mut store).unwrap());
    assert_eq!(store.cards(), before.as_slice());
}

#[test]
fn load_with_invalid_blob_leaves_store_untouched() {
    let mut storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, r#"[{"id":"a"}]"#).unwrap();
    let mut store = sample_store();
    let revision = store.revision();
    assert!(!load(&storage, &mut store).unwrap());
    assert_eq!(store.cards().len(), 2);
    assert_eq!(store.revision(), revision);
}

#[test]
fn load_replaces_existing_cards() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(STORAGE_KEY, r#"[{"id":"only","text":"x","position":{"x":0,"y":0},"width":100}]"#)
        .unwrap();
    let mut store = sample_store();
    assert!(load(&storage, &mut store).unwrap());
    assert_eq!(store.cards().len(), 1);
    assert_eq!(store.cards()[0].id, "only");
}

#[test]
fn load_propagates_storage_failure() {
    let mut store = CardStore::new();
    assert!(matches!(load(&BrokenStorage, &mut store), Err(PersistError::Storage(_))));
}

#[test]
fn save_propagates_storage_failure() {
    let store = sample_store();
    let mut storage = BrokenStorage;
    let err = save(&mut storage, &store).unwrap_err();
    assert!(err.to_string().contains("QuotaExceededError"));
}
