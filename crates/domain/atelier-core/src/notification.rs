use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a user-facing notification, persisted as snake_case
/// strings so the stored records match what the UI layer dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OrderPlaced,
    OrderConfirmed,
    OrderAssigned,
    OrderStitchingCompleted,
    OrderPacked,
    OrderShipped,
    OrderDelivered,
    MeasurementSaved,
    DesignReady,
    AccountUpdate,
    System,
    Promotion,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::OrderPlaced => "order_placed",
            NotificationKind::OrderConfirmed => "order_confirmed",
            NotificationKind::OrderAssigned => "order_assigned",
            NotificationKind::OrderStitchingCompleted => "order_stitching_completed",
            NotificationKind::OrderPacked => "order_packed",
            NotificationKind::OrderShipped => "order_shipped",
            NotificationKind::OrderDelivered => "order_delivered",
            NotificationKind::MeasurementSaved => "measurement_saved",
            NotificationKind::DesignReady => "design_ready",
            NotificationKind::AccountUpdate => "account_update",
            NotificationKind::System => "system",
            NotificationKind::Promotion => "promotion",
        }
    }
}

/// A persisted notification. `link_to` is an opaque route the host UI
/// resolves; nothing here navigates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub icon: String,
    #[serde(default)]
    pub link_to: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Everything a caller supplies when raising a notification. The store
/// assigns the id, timestamp and read state.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub icon: String,
    pub link_to: Option<String>,
}

impl NotificationDraft {
    pub fn into_notification(self, now: DateTime<Utc>) -> Notification {
        Notification {
            id: Uuid::new_v4().to_string(),
            kind: self.kind,
            title: self.title,
            message: self.message,
            icon: self.icon,
            link_to: self.link_to,
            is_read: false,
            created_at: now,
        }
    }
}
