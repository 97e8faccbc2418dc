use std::sync::Arc;

use atelier_core::status::{self, StatusObservation};
use atelier_persistence::KeyValueStore;

use crate::notifications::NotificationStore;
use crate::ports::StatusFeed;
use crate::{keys, WatchError};

/// Turns order status readings into at-most-one notification per
/// transition, using a per-order ledger of the last status already
/// surfaced.
pub struct StatusWatcher {
    store: Arc<dyn KeyValueStore>,
    notifications: Arc<NotificationStore>,
}

impl StatusWatcher {
    pub fn new(store: Arc<dyn KeyValueStore>, notifications: Arc<NotificationStore>) -> Self {
        Self {
            store,
            notifications,
        }
    }

    /// Feed one observation through the ledger. Returns the id of the
    /// notification raised, or None when nothing new was surfaced.
    ///
    /// The first sighting of an order only records a baseline; statuses
    /// the user logically already knows are not back-filled.
    pub fn observe(&self, observation: &StatusObservation) -> Option<String> {
        let ledger_key = keys::notified_status_key(&observation.order_id);
        match self.store.get(&ledger_key) {
            None => {
                self.store.set(&ledger_key, &observation.status);
                None
            }
            Some(last) if last == observation.status => None,
            Some(_) => {
                let draft = status::notification_for(observation);
                let id = self.notifications.add(draft);
                self.store.set(&ledger_key, &observation.status);
                Some(id)
            }
        }
    }

    /// Fetch one reading from the feed and run it through
    /// [`observe`](StatusWatcher::observe).
    pub async fn poll(
        &self,
        feed: &dyn StatusFeed,
        order_id: &str,
    ) -> Result<Option<String>, WatchError> {
        let observation = feed.fetch_status(order_id).await?;
        Ok(self.observe(&observation))
    }
}
