use super::*;
use canvas::camera::Point;
use canvas::persist::{MemoryStorage, STORAGE_KEY, decode_cards, encode_cards};

fn stored_cards(storage: &MemoryStorage) -> Vec<canvas::doc::Card> {
    let raw = storage.get_item(STORAGE_KEY).unwrap().unwrap();
    decode_cards(&raw).unwrap()
}

#[test]
fn first_save_writes_even_empty_board() {
    let store = CardStore::new();
    let mut storage = MemoryStorage::new();
    let mut tracker = SaveTracker::new();

    assert!(tracker.save_if_changed(&store, &mut storage).unwrap());
    assert!(stored_cards(&storage).is_empty());
}

#[test]
fn unchanged_revision_is_not_rewritten() {
    let mut store = CardStore::new();
    store.add_card("# a", Point::new(0.0, 0.0));
    let mut storage = MemoryStorage::new();
    let mut tracker = SaveTracker::new();

    assert!(tracker.save_if_changed(&store, &mut storage).unwrap());
    assert!(!tracker.save_if_changed(&store, &mut storage).unwrap());
}

#[test]
fn each_mutation_is_saved() {
    let mut store = CardStore::new();
    let mut storage = MemoryStorage::new();
    let mut tracker = SaveTracker::new();

    let id = store.add_card("# a", Point::new(0.0, 0.0));
    tracker.save_if_changed(&store, &mut storage).unwrap();
    store.update_position(&id, Point::new(10.0, 5.0));
    assert!(tracker.save_if_changed(&store, &mut storage).unwrap());

    let cards = stored_cards(&storage);
    assert_eq!(cards[0].position, Point::new(10.0, 5.0));
}

#[test]
fn ai_cards_do_not_trigger_saves() {
    let mut store = CardStore::new();
    let mut storage = MemoryStorage::new();
    let mut tracker = SaveTracker::new();
    tracker.save_if_changed(&store, &mut storage).unwrap();

    let ai = store.add_ai_card("prompt", Point::new(0.0, 0.0));
    store.append_ai_text(&ai, "streaming");
    assert!(!tracker.save_if_changed(&store, &mut storage).unwrap());
}

#[test]
fn restore_applies_valid_blob_without_rewriting() {
    let mut source = CardStore::new();
    source.add_card("# kept", Point::new(3.0, 4.0));
    let mut storage = MemoryStorage::new();
    storage
        .set_item(STORAGE_KEY, &encode_cards(source.cards()).unwrap())
        .unwrap();

    let mut store = CardStore::new();
    let mut tracker = SaveTracker::new();
    assert!(tracker.restore(&mut store, &storage).unwrap());
    assert_eq!(store.cards()[0].text, "# kept");
    assert!(!tracker.save_if_changed(&store, &mut storage).unwrap());
}

#[test]
fn restore_ignores_invalid_blob() {
    let mut storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, r#"[{"id":1}]"#).unwrap();

    let mut store = CardStore::new();
    let mut tracker = SaveTracker::new();
    assert!(!tracker.restore(&mut store, &storage).unwrap());
    assert!(store.is_empty());
}

#[test]
fn restore_with_nothing_stored_starts_empty() {
    let storage = MemoryStorage::new();
    let mut store = CardStore::new();
    let mut tracker = SaveTracker::new();

    assert!(!tracker.restore(&mut store, &storage).unwrap());
    let mut storage = storage;
    assert!(tracker.save_if_changed(&store, &mut storage).unwrap());
}
