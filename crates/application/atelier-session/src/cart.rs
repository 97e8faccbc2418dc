use std::sync::{Arc, Mutex};

use atelier_core::cart::{self, CartCandidate, CartItem};
use atelier_persistence::KeyValueStore;
use rust_decimal::Decimal;

use crate::identity::IdentityResolver;
use crate::{keys, CartError};

struct CartState {
    /// Storage key of the snapshot currently held in `items`.
    key: String,
    items: Vec<CartItem>,
    open: bool,
}

/// Per-identity shopping cart. The in-memory snapshot is authoritative;
/// every mutation is mirrored to the substrate under the active
/// identity's key.
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
    resolver: Arc<IdentityResolver>,
    state: Mutex<CartState>,
}

impl CartStore {
    pub fn new(store: Arc<dyn KeyValueStore>, resolver: Arc<IdentityResolver>) -> Self {
        let key = keys::cart_key(&resolver.current());
        let items = load_snapshot(store.as_ref(), &key);
        Self {
            store,
            resolver,
            state: Mutex::new(CartState {
                key,
                items,
                open: false,
            }),
        }
    }

    /// Re-read the active identity's snapshot. Reading twice with no
    /// intervening write yields the same items.
    pub fn load(&self) {
        let key = keys::cart_key(&self.resolver.current());
        let items = load_snapshot(self.store.as_ref(), &key);
        let mut state = self.state.lock().unwrap();
        state.key = key;
        state.items = items;
    }

    /// Drop the outgoing identity's snapshot and pick up the incoming
    /// one. Never merges the two carts.
    pub fn switch_identity(&self) {
        self.load();
    }

    /// Normalize, validate and add an item, merging quantities when the
    /// id already exists. Opens the cart panel on success and returns
    /// the item id.
    pub fn add_item(&self, candidate: CartCandidate) -> Result<String, CartError> {
        if self.resolver.current().is_guest() {
            return Err(CartError::AuthRequired);
        }

        let item = candidate.into_item();
        if item.price <= Decimal::ZERO {
            return Err(CartError::InvalidItem(format!(
                "price must be positive, got {}",
                item.price
            )));
        }

        let mut state = self.state.lock().unwrap();
        let id = item.id.clone();
        match state.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => state.items.push(item),
        }
        state.open = true;
        self.persist(&state);
        Ok(id)
    }

    pub fn remove_item(&self, item_id: &str) {
        let mut state = self.state.lock().unwrap();
        let before = state.items.len();
        state.items.retain(|line| line.id != item_id);
        if state.items.len() != before {
            self.persist(&state);
        }
    }

    /// Set a line's quantity. Zero or negative removes the line.
    pub fn update_quantity(&self, item_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(item_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let mut state = self.state.lock().unwrap();
        match state.items.iter_mut().find(|line| line.id == item_id) {
            Some(line) => line.quantity = quantity,
            None => return,
        }
        self.persist(&state);
    }

    /// Empty the cart and delete its persisted snapshot outright, so the
    /// key reads as absent rather than as an empty list.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.items.clear();
        self.store.remove(&state.key);
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.state.lock().unwrap().items.clone()
    }

    pub fn total(&self) -> Decimal {
        cart::cart_total(&self.state.lock().unwrap().items)
    }

    pub fn item_count(&self) -> u64 {
        cart::item_count(&self.state.lock().unwrap().items)
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().unwrap().open
    }

    pub fn set_open(&self, open: bool) {
        self.state.lock().unwrap().open = open;
    }

    fn persist(&self, state: &CartState) {
        match serde_json::to_string(&state.items) {
            Ok(json) => self.store.set(&state.key, &json),
            Err(e) => tracing::warn!("could not serialize cart snapshot: {}", e),
        }
    }
}

fn load_snapshot(store: &dyn KeyValueStore, key: &str) -> Vec<CartItem> {
    let raw = match store.get(key) {
        Some(raw) => raw,
        None => return Vec::new(),
    };
    match serde_json::from_str::<Vec<CartItem>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("cart snapshot at {} corrupted, clearing: {}", key, e);
            store.remove(key);
            Vec::new()
        }
    }
}
