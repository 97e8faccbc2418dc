use async_trait::async_trait;
use atelier_core::status::StatusObservation;

use crate::WatchError;

/// External order status feed. Read-only from this side; transport and
/// decode failures surface as [`WatchError::Feed`].
#[async_trait]
pub trait StatusFeed: Send + Sync {
    async fn fetch_status(&self, order_id: &str) -> Result<StatusObservation, WatchError>;
}
