use std::sync::{Arc, Mutex};

use atelier_core::{Identity, SessionIdentity};
use atelier_persistence::KeyValueStore;

use crate::keys;

pub type IdentityListener = Arc<dyn Fn(&SessionIdentity) + Send + Sync>;

/// Resolves who the session is acting as, backed by the `identity` key.
///
/// The resolved identity is cached; storage is only re-read on an
/// explicit [`refresh`](IdentityResolver::refresh), which the engine
/// drives from the substrate's change signal when one exists.
pub struct IdentityResolver {
    store: Arc<dyn KeyValueStore>,
    current: Mutex<SessionIdentity>,
    listeners: Mutex<Vec<IdentityListener>>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let current = load_identity(store.as_ref());
        Self {
            store,
            current: Mutex::new(current),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> SessionIdentity {
        self.current.lock().unwrap().clone()
    }

    /// Persist the identity record and announce the change.
    pub fn sign_in(&self, identity: Identity) {
        match serde_json::to_string(&identity) {
            Ok(json) => self.store.set(keys::IDENTITY_KEY, &json),
            Err(e) => tracing::warn!("could not persist identity record: {}", e),
        }
        self.transition(SessionIdentity::User(identity));
    }

    pub fn sign_out(&self) {
        self.store.remove(keys::IDENTITY_KEY);
        self.transition(SessionIdentity::Guest);
    }

    /// Listeners fire on every real identity change, whether it came
    /// from this handle or from a watched write elsewhere.
    pub fn on_change(&self, listener: IdentityListener) {
        self.listeners.lock().unwrap().push(listener);
    }

    /// Re-read the persisted identity and fire listeners if it moved.
    pub fn refresh(&self) {
        let next = load_identity(self.store.as_ref());
        self.transition(next);
    }

    fn transition(&self, next: SessionIdentity) {
        {
            let mut current = self.current.lock().unwrap();
            if *current == next {
                return;
            }
            *current = next.clone();
        }
        // Callbacks run with no lock held so they may call back in.
        let listeners: Vec<IdentityListener> = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener(&next);
        }
    }
}

fn load_identity(store: &dyn KeyValueStore) -> SessionIdentity {
    let raw = match store.get(keys::IDENTITY_KEY) {
        Some(raw) => raw,
        None => return SessionIdentity::Guest,
    };
    match serde_json::from_str::<Identity>(&raw) {
        Ok(identity) => SessionIdentity::User(identity),
        Err(e) => {
            tracing::warn!(
                "identity record corrupted, clearing and continuing as guest: {}",
                e
            );
            store.remove(keys::IDENTITY_KEY);
            SessionIdentity::Guest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Role;
    use atelier_persistence::MemoryKeyValueStore;

    fn customer(id: &str) -> Identity {
        Identity {
            id: id.into(),
            role: Role::Customer,
        }
    }

    #[test]
    fn starts_as_guest_when_nothing_is_persisted() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let resolver = IdentityResolver::new(store);
        assert!(resolver.current().is_guest());
    }

    #[test]
    fn sign_in_persists_and_sign_out_clears() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let resolver = IdentityResolver::new(store.clone());

        resolver.sign_in(customer("u1"));
        assert_eq!(
            resolver.current().user().map(|u| u.id.clone()).as_deref(),
            Some("u1")
        );
        assert!(store.get(keys::IDENTITY_KEY).is_some());

        resolver.sign_out();
        assert!(resolver.current().is_guest());
        assert_eq!(store.get(keys::IDENTITY_KEY), None);
    }

    #[test]
    fn corrupt_identity_record_is_cleared_and_reads_guest() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(keys::IDENTITY_KEY, "{not json");

        let resolver = IdentityResolver::new(store.clone());
        assert!(resolver.current().is_guest());
        assert_eq!(store.get(keys::IDENTITY_KEY), None, "corrupt record should be deleted");
    }

    #[test]
    fn listeners_fire_once_per_real_change() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let resolver = IdentityResolver::new(store);

        let seen: Arc<Mutex<Vec<bool>>> = Arc::default();
        let sink = seen.clone();
        resolver.on_change(Arc::new(move |identity| {
            sink.lock().unwrap().push(identity.is_guest());
        }));

        resolver.sign_in(customer("u1"));
        resolver.sign_in(customer("u1")); // no change
        resolver.sign_out();

        assert_eq!(*seen.lock().unwrap(), vec![false, true]);
    }

    #[test]
    fn refresh_picks_up_external_writes() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let resolver = IdentityResolver::new(store.clone());

        let raw = serde_json::to_string(&customer("u2")).unwrap();
        store.set(keys::IDENTITY_KEY, &raw);
        assert!(resolver.current().is_guest(), "cache stays until refresh");

        resolver.refresh();
        assert_eq!(
            resolver.current().user().map(|u| u.id.clone()).as_deref(),
            Some("u2")
        );
    }
}
