use std::sync::{Arc, Mutex};

use atelier_core::notification::{Notification, NotificationDraft};
use atelier_persistence::KeyValueStore;
use chrono::Utc;

use crate::keys;

/// Persisted notification list, newest first. The list lives under one
/// global key shared by every identity on the device.
pub struct NotificationStore {
    store: Arc<dyn KeyValueStore>,
    items: Mutex<Vec<Notification>>,
}

impl NotificationStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let items = load_list(store.as_ref());
        Self {
            store,
            items: Mutex::new(items),
        }
    }

    /// Newest first.
    pub fn list(&self) -> Vec<Notification> {
        self.items.lock().unwrap().clone()
    }

    /// Derived from the list on every call; there is no separate
    /// counter to drift out of sync.
    pub fn unread_count(&self) -> usize {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|n| !n.is_read)
            .count()
    }

    /// Assigns id and timestamp, prepends, persists. Returns the id so
    /// callers can reference the notification later.
    pub fn add(&self, draft: NotificationDraft) -> String {
        let notification = draft.into_notification(Utc::now());
        let id = notification.id.clone();
        let mut items = self.items.lock().unwrap();
        items.insert(0, notification);
        self.persist(&items);
        id
    }

    /// Read state only ever moves forward; re-marking is a no-op.
    pub fn mark_read(&self, id: &str) {
        let mut items = self.items.lock().unwrap();
        let mut changed = false;
        for n in items.iter_mut() {
            if n.id == id && !n.is_read {
                n.is_read = true;
                changed = true;
            }
        }
        if changed {
            self.persist(&items);
        }
    }

    pub fn mark_all_read(&self) {
        let mut items = self.items.lock().unwrap();
        let mut changed = false;
        for n in items.iter_mut() {
            if !n.is_read {
                n.is_read = true;
                changed = true;
            }
        }
        if changed {
            self.persist(&items);
        }
    }

    pub fn remove(&self, id: &str) {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|n| n.id != id);
        if items.len() != before {
            self.persist(&items);
        }
    }

    /// Drop everything, including the persisted list itself.
    pub fn clear_all(&self) {
        let mut items = self.items.lock().unwrap();
        items.clear();
        self.store.remove(keys::NOTIFICATIONS_KEY);
    }

    fn persist(&self, items: &[Notification]) {
        match serde_json::to_string(items) {
            Ok(json) => self.store.set(keys::NOTIFICATIONS_KEY, &json),
            Err(e) => tracing::warn!("could not serialize notification list: {}", e),
        }
    }
}

fn load_list(store: &dyn KeyValueStore) -> Vec<Notification> {
    let raw = match store.get(keys::NOTIFICATIONS_KEY) {
        Some(raw) => raw,
        None => return Vec::new(),
    };
    match serde_json::from_str::<Vec<Notification>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("notification list corrupted, clearing: {}", e);
            store.remove(keys::NOTIFICATIONS_KEY);
            Vec::new()
        }
    }
}
