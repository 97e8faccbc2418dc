use atelier_core::SessionIdentity;

pub const IDENTITY_KEY: &str = "identity";
pub const NOTIFICATIONS_KEY: &str = "notifications";

const GUEST_SCOPE: &str = "guest";

/// Cart snapshot key for an identity: `cart:<userId>`, or `cart:guest`
/// when nobody is signed in.
pub fn cart_key(identity: &SessionIdentity) -> String {
    match identity.user() {
        Some(user) => format!("cart:{}", user.id),
        None => format!("cart:{GUEST_SCOPE}"),
    }
}

/// Ledger key holding the last status already surfaced for an order.
pub fn notified_status_key(order_id: &str) -> String {
    format!("notified-status:{order_id}")
}
