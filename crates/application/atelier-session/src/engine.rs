use std::sync::Arc;

use atelier_persistence::KeyValueStore;

use crate::cart::CartStore;
use crate::identity::IdentityResolver;
use crate::keys;
use crate::notifications::NotificationStore;
use crate::watcher::StatusWatcher;

/// Composition root: one substrate, the four session components, and
/// the wiring between them. Two engines over a shared substrate behave
/// like two tabs onto the same storage.
pub struct SessionEngine {
    identity: Arc<IdentityResolver>,
    cart: Arc<CartStore>,
    notifications: Arc<NotificationStore>,
    watcher: StatusWatcher,
}

impl SessionEngine {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let identity = Arc::new(IdentityResolver::new(store.clone()));
        let cart = Arc::new(CartStore::new(store.clone(), identity.clone()));
        let notifications = Arc::new(NotificationStore::new(store.clone()));
        let watcher = StatusWatcher::new(store.clone(), notifications.clone());

        // Every identity change re-keys the cart, discarding the old
        // snapshot rather than merging it.
        let cart_on_change = cart.clone();
        identity.on_change(Arc::new(move |_| cart_on_change.switch_identity()));

        // When the substrate can signal writes from elsewhere, route
        // identity-key changes back through the resolver. The resolver
        // drops echoes of its own writes via its cache comparison.
        let identity_on_watch = identity.clone();
        let watched = store.watch(Arc::new(move |key| {
            if key == keys::IDENTITY_KEY {
                identity_on_watch.refresh();
            }
        }));
        if !watched {
            tracing::debug!("substrate has no change signal; external identity changes need an explicit refresh");
        }

        Self {
            identity,
            cart,
            notifications,
            watcher,
        }
    }

    pub fn identity(&self) -> &IdentityResolver {
        &self.identity
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    pub fn watcher(&self) -> &StatusWatcher {
        &self.watcher
    }
}
