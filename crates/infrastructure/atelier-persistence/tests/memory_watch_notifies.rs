use std::sync::{Arc, Mutex};

use atelier_persistence::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

#[test]
fn watch_reports_changed_keys_across_handles() {
    let store = MemoryKeyValueStore::new();
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();

    let sink = seen.clone();
    let supported = store.watch(Arc::new(move |key| {
        sink.lock().unwrap().push(key.to_string());
    }));
    assert!(supported, "memory substrate should support watch");

    let other_handle = store.clone();
    other_handle.set("identity", "{}");
    other_handle.remove("identity");
    other_handle.remove("identity"); // absent, no event

    assert_eq!(*seen.lock().unwrap(), vec!["identity", "identity"]);
}

#[test]
fn listener_may_reenter_the_store() {
    let store = MemoryKeyValueStore::new();
    let echo = store.clone();
    store.watch(Arc::new(move |key| {
        // Reads from inside a change callback must not deadlock.
        let _ = echo.get(key);
    }));
    store.set("cart:guest", "[]");
    assert_eq!(store.get("cart:guest").as_deref(), Some("[]"));
}

#[test]
fn file_substrate_has_no_change_signal() {
    let dir = tempfile::tempdir().unwrap();
    let root = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    let store = FileKeyValueStore::new(root);
    assert!(!store.watch(Arc::new(|_| {})));
}
