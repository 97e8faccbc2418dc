use std::sync::Arc;

use atelier_core::cart::CartCandidate;
use atelier_core::{Identity, Role};
use atelier_persistence::{KeyValueStore, MemoryKeyValueStore};
use atelier_session::{CartError, SessionEngine};
use rust_decimal::Decimal;

fn signed_in_engine(store: Arc<MemoryKeyValueStore>) -> SessionEngine {
    let engine = SessionEngine::new(store);
    engine.identity().sign_in(Identity {
        id: "u1".into(),
        role: Role::Customer,
    });
    engine
}

fn candidate(id: &str, price: &str, quantity: u32) -> CartCandidate {
    CartCandidate {
        id: Some(id.into()),
        name: format!("item {id}"),
        price: Some(price.parse().unwrap()),
        quantity: Some(quantity),
        ..Default::default()
    }
}

#[test]
fn adding_an_existing_id_merges_quantities() {
    let engine = signed_in_engine(Arc::new(MemoryKeyValueStore::new()));

    engine.cart().add_item(candidate("suit-1", "10.00", 2)).unwrap();
    engine.cart().add_item(candidate("suit-1", "10.00", 3)).unwrap();

    let items = engine.cart().items();
    assert_eq!(items.len(), 1, "same id stays one line");
    assert_eq!(items[0].quantity, 5);
    assert_eq!(engine.cart().item_count(), 5);
    assert_eq!(engine.cart().total(), "50.00".parse::<Decimal>().unwrap());
}

#[test]
fn non_positive_prices_are_rejected_without_mutation() {
    let engine = signed_in_engine(Arc::new(MemoryKeyValueStore::new()));
    engine.cart().add_item(candidate("ok", "25", 1)).unwrap();
    let before_total = engine.cart().total();

    let zero = engine.cart().add_item(candidate("free", "0", 1));
    assert!(matches!(zero, Err(CartError::InvalidItem(_))));

    let negative = engine.cart().add_item(candidate("refund", "-5", 1));
    assert!(matches!(negative, Err(CartError::InvalidItem(_))));

    // A candidate without any price normalizes to zero and is rejected.
    let missing = engine.cart().add_item(CartCandidate {
        name: "Mystery".into(),
        ..Default::default()
    });
    assert!(matches!(missing, Err(CartError::InvalidItem(_))));

    assert_eq!(engine.cart().items().len(), 1);
    assert_eq!(engine.cart().total(), before_total);
}

#[test]
fn guests_cannot_add_items() {
    let engine = SessionEngine::new(Arc::new(MemoryKeyValueStore::new()));
    let err = engine.cart().add_item(candidate("suit-1", "10", 1));
    assert_eq!(err, Err(CartError::AuthRequired));
    assert_eq!(engine.cart().item_count(), 0);
    assert!(!engine.cart().is_open(), "rejected add must not open the panel");
}

#[test]
fn successful_add_opens_the_panel() {
    let engine = signed_in_engine(Arc::new(MemoryKeyValueStore::new()));
    assert!(!engine.cart().is_open());

    engine.cart().add_item(candidate("suit-1", "10", 1)).unwrap();
    assert!(engine.cart().is_open());

    engine.cart().set_open(false);
    assert!(!engine.cart().is_open());
}

#[test]
fn clear_deletes_the_persisted_snapshot() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let engine = signed_in_engine(store.clone());

    engine.cart().add_item(candidate("suit-1", "10", 1)).unwrap();
    assert!(store.get("cart:u1").is_some());

    engine.cart().clear();
    assert_eq!(engine.cart().item_count(), 0);
    assert_eq!(
        store.get("cart:u1"),
        None,
        "clear removes the key, it does not write an empty list"
    );
}

#[test]
fn quantity_updates_follow_the_remove_at_zero_rule() {
    let engine = signed_in_engine(Arc::new(MemoryKeyValueStore::new()));
    engine.cart().add_item(candidate("suit-1", "10", 2)).unwrap();

    engine.cart().update_quantity("suit-1", 4);
    assert_eq!(engine.cart().items()[0].quantity, 4);

    engine.cart().update_quantity("unknown", 7); // no such line
    assert_eq!(engine.cart().item_count(), 4);

    engine.cart().update_quantity("suit-1", 0);
    assert!(engine.cart().items().is_empty(), "zero removes the line");

    engine.cart().add_item(candidate("suit-1", "10", 1)).unwrap();
    engine.cart().update_quantity("suit-1", -3);
    assert!(engine.cart().items().is_empty(), "negative removes the line");
}

#[test]
fn removing_a_line_only_touches_that_line() {
    let engine = signed_in_engine(Arc::new(MemoryKeyValueStore::new()));
    engine.cart().add_item(candidate("a", "10", 1)).unwrap();
    engine.cart().add_item(candidate("b", "20", 1)).unwrap();

    engine.cart().remove_item("a");
    let items = engine.cart().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "b");
}

#[test]
fn corrupt_snapshot_is_cleared_and_cart_recovers() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store.set("cart:u1", "{{{ not a snapshot");

    let engine = signed_in_engine(store.clone());
    assert_eq!(engine.cart().item_count(), 0);
    assert_eq!(
        store.get("cart:u1"),
        None,
        "corrupt snapshot should be deleted on load"
    );

    engine.cart().add_item(candidate("suit-1", "10", 1)).unwrap();
    assert!(store.get("cart:u1").is_some(), "cart persists again after recovery");
}
