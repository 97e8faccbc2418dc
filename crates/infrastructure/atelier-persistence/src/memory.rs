use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::api::{ChangeListener, KeyValueStore};

/// In-memory substrate. Clones share one map, so two engines over clones
/// of the same store behave like two tabs over the same browser storage,
/// change notifications included.
#[derive(Default, Clone)]
pub struct MemoryKeyValueStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: Mutex<HashMap<String, String>>,
    listeners: Mutex<Vec<ChangeListener>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self, key: &str) {
        // Snapshot the listeners so callbacks run without any lock held
        // and can re-enter the store.
        let listeners: Vec<ChangeListener> =
            self.inner.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener(key);
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.notify(key);
    }

    fn remove(&self, key: &str) {
        let removed = self.inner.entries.lock().unwrap().remove(key);
        if removed.is_some() {
            self.notify(key);
        }
    }

    fn watch(&self, listener: ChangeListener) -> bool {
        self.inner.listeners.lock().unwrap().push(listener);
        true
    }
}
