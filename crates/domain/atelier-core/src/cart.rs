use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tailoring details carried alongside a cart line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItemMetadata {
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_days: Option<u32>,
}

/// One line of a persisted cart snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub metadata: CartItemMetadata,
}

/// An un-normalized add request, as product pages produce them. Missing
/// fields are filled by [`CartCandidate::into_item`].
#[derive(Debug, Clone, Default)]
pub struct CartCandidate {
    pub id: Option<String>,
    pub name: String,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
    pub category: String,
    pub image: String,
    pub metadata: CartItemMetadata,
}

impl CartCandidate {
    /// Normalize into a full cart line: synthesize an id when none was
    /// given, coerce the quantity to at least 1, default the price to
    /// zero. A zero price fails the acceptance check downstream.
    pub fn into_item(self) -> CartItem {
        CartItem {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            price: self.price.unwrap_or(Decimal::ZERO),
            quantity: self.quantity.unwrap_or(1).max(1),
            category: self.category,
            image: self.image,
            metadata: self.metadata,
        }
    }
}

/// Sum of `price * quantity` over a snapshot. A line whose product
/// overflows contributes zero instead of poisoning the total.
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items.iter().fold(Decimal::ZERO, |total, item| {
        let line = item
            .price
            .checked_mul(Decimal::from(item.quantity))
            .unwrap_or(Decimal::ZERO);
        total.checked_add(line).unwrap_or(total)
    })
}

/// Total number of units across all lines.
pub fn item_count(items: &[CartItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |count, item| count.saturating_add(u64::from(item.quantity)))
}
