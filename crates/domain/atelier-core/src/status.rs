use crate::notification::{NotificationDraft, NotificationKind};

/// Lifecycle states the order status feed reports, in forward order.
/// Nothing here enforces ordering; the feed is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Assigned,
    InProgress,
    Completed,
    Packed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "placed" => Some(OrderStatus::Placed),
            "confirmed" => Some(OrderStatus::Confirmed),
            "assigned" => Some(OrderStatus::Assigned),
            "in_progress" => Some(OrderStatus::InProgress),
            "completed" => Some(OrderStatus::Completed),
            "packed" => Some(OrderStatus::Packed),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Assigned => "assigned",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Delivery ends the lifecycle; polling loops stop here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

/// One reading from the order status feed. Ephemeral, never persisted.
#[derive(Debug, Clone)]
pub struct StatusObservation {
    pub order_id: String,
    pub status: String,
    pub assigned_tailor: Option<String>,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<String>,
}

impl StatusObservation {
    pub fn new(order_id: impl Into<String>, status: impl Into<String>) -> Self {
        StatusObservation {
            order_id: order_id.into(),
            status: status.into(),
            assigned_tailor: None,
            tracking_number: None,
            estimated_delivery: None,
        }
    }
}

/// Compose the user-facing notification for an observed status. Statuses
/// outside the known set fall back to a generic update so a newer backend
/// never breaks older clients.
pub fn notification_for(observation: &StatusObservation) -> NotificationDraft {
    let order_id = &observation.order_id;
    let link_to = Some(format!("/orders/{order_id}"));

    let (kind, title, message, icon) = match OrderStatus::parse(&observation.status) {
        Some(OrderStatus::Placed) => (
            NotificationKind::OrderPlaced,
            "Order Placed",
            format!("Your order #{order_id} has been placed."),
            "🛒",
        ),
        Some(OrderStatus::Confirmed) => (
            NotificationKind::OrderConfirmed,
            "Order Confirmed",
            format!("Your order #{order_id} has been confirmed."),
            "✅",
        ),
        Some(OrderStatus::Assigned) => (
            NotificationKind::OrderAssigned,
            "Tailor Assigned",
            match &observation.assigned_tailor {
                Some(tailor) => format!("{tailor} will be stitching your order #{order_id}."),
                None => format!("A tailor has been assigned to your order #{order_id}."),
            },
            "🧵",
        ),
        Some(OrderStatus::InProgress) => (
            NotificationKind::System,
            "Stitching In Progress",
            format!("Stitching has started on your order #{order_id}."),
            "✂️",
        ),
        Some(OrderStatus::Completed) => (
            NotificationKind::OrderStitchingCompleted,
            "Stitching Completed",
            format!("Stitching is complete for your order #{order_id}."),
            "🪡",
        ),
        Some(OrderStatus::Packed) => (
            NotificationKind::OrderPacked,
            "Order Packed",
            match &observation.tracking_number {
                Some(tracking) => format!(
                    "Your order #{order_id} has been packed. Tracking number: {tracking}."
                ),
                None => format!("Your order #{order_id} has been packed."),
            },
            "📦",
        ),
        Some(OrderStatus::Shipped) => (
            NotificationKind::OrderShipped,
            "Order Shipped",
            match &observation.tracking_number {
                Some(tracking) => format!(
                    "Your order #{order_id} is on its way. Tracking number: {tracking}."
                ),
                None => format!("Your order #{order_id} is on its way."),
            },
            "🚚",
        ),
        Some(OrderStatus::Delivered) => (
            NotificationKind::OrderDelivered,
            "Order Delivered",
            format!("Your order #{order_id} has been delivered."),
            "🎉",
        ),
        None => (
            NotificationKind::System,
            "Order Update",
            format!(
                "Your order #{order_id} status changed to {}.",
                observation.status
            ),
            "🔔",
        ),
    };

    NotificationDraft {
        kind,
        title: title.to_string(),
        message,
        icon: icon.to_string(),
        link_to,
    }
}
