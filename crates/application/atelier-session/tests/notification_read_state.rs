use std::sync::Arc;

use atelier_core::notification::{NotificationDraft, NotificationKind};
use atelier_persistence::{KeyValueStore, MemoryKeyValueStore};
use atelier_session::NotificationStore;

fn draft(title: &str) -> NotificationDraft {
    NotificationDraft {
        kind: NotificationKind::System,
        title: title.into(),
        message: format!("{title} message"),
        icon: "🔔".into(),
        link_to: None,
    }
}

#[test]
fn add_prepends_and_returns_the_id() {
    let store = NotificationStore::new(Arc::new(MemoryKeyValueStore::new()));

    let first = store.add(draft("first"));
    let second = store.add(draft("second"));
    assert_ne!(first, second);

    let list = store.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title, "second", "newest first");
    assert_eq!(list[0].id, second);
    assert!(list.iter().all(|n| !n.is_read));
}

#[test]
fn read_state_only_moves_forward() {
    let store = NotificationStore::new(Arc::new(MemoryKeyValueStore::new()));
    let a = store.add(draft("a"));
    store.add(draft("b"));
    assert_eq!(store.unread_count(), 2);

    store.mark_read(&a);
    assert_eq!(store.unread_count(), 1);

    store.mark_read(&a);
    assert_eq!(store.unread_count(), 1, "re-marking changes nothing");

    store.mark_all_read();
    assert_eq!(store.unread_count(), 0);

    store.mark_all_read();
    assert_eq!(store.unread_count(), 0);
    assert!(store.list().iter().all(|n| n.is_read), "nothing ever un-reads");
}

#[test]
fn marking_an_unknown_id_is_a_no_op() {
    let store = NotificationStore::new(Arc::new(MemoryKeyValueStore::new()));
    store.add(draft("a"));
    store.mark_read("no-such-id");
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn remove_and_clear_delete_notifications() {
    let substrate = Arc::new(MemoryKeyValueStore::new());
    let store = NotificationStore::new(substrate.clone());
    let a = store.add(draft("a"));
    store.add(draft("b"));

    store.remove(&a);
    assert_eq!(store.list().len(), 1);

    store.clear_all();
    assert!(store.list().is_empty());
    assert_eq!(
        substrate.get("notifications"),
        None,
        "clearing drops the persisted list"
    );
}

#[test]
fn list_survives_a_new_store_over_the_same_substrate() {
    let substrate = Arc::new(MemoryKeyValueStore::new());
    let store = NotificationStore::new(substrate.clone());
    let id = store.add(draft("kept"));
    store.mark_read(&id);

    let reopened = NotificationStore::new(substrate);
    let list = reopened.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "kept");
    assert!(list[0].is_read, "read state is persisted");
}

#[test]
fn corrupt_list_is_cleared_and_store_starts_empty() {
    let substrate = Arc::new(MemoryKeyValueStore::new());
    substrate.set("notifications", "[{\"id\":");

    let store = NotificationStore::new(substrate.clone());
    assert!(store.list().is_empty());
    assert_eq!(substrate.get("notifications"), None);

    store.add(draft("after recovery"));
    assert_eq!(store.unread_count(), 1);
}
