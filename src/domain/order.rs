use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CartItem;

/// A completed checkout. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub coupon_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order, deriving `total` from `subtotal - discount`.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        items: Vec<CartItem>,
        subtotal: f64,
        discount: f64,
        coupon_code: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            items,
            subtotal,
            discount,
            total: subtotal - discount,
            coupon_code,
            created_at: Utc::now(),
        }
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
