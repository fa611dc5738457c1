use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn put_and_get_roundtrip() {
    let mut store = MemoryStore::new();
    store.put("key", "value").unwrap();
    assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
    assert_eq!(store.len(), 1);
}

#[test]
fn get_absent_key_returns_none() {
    let store = MemoryStore::new();
    assert!(store.get("missing").unwrap().is_none());
}

#[test]
fn put_overwrites_previous_value() {
    let mut store = MemoryStore::new();
    store.put("key", "old").unwrap();
    store.put("key", "new").unwrap();
    assert_eq!(store.get("key").unwrap().as_deref(), Some("new"));
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_drops_key() {
    let mut store = MemoryStore::new();
    store.put("key", "value").unwrap();
    store.remove("key").unwrap();
    assert!(store.get("key").unwrap().is_none());
    assert!(store.is_empty());
}

#[test]
fn remove_absent_key_is_ok() {
    let mut store = MemoryStore::new();
    assert!(store.remove("missing").is_ok());
}

#[test]
fn keys_are_independent() {
    let mut store = MemoryStore::new();
    store.put("a", "1").unwrap();
    store.put("b", "2").unwrap();
    store.remove("a").unwrap();
    assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
}
