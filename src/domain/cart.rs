use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Product;

/// A single product line. `product_id` is unique within a cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A user's shopping cart. Created lazily on the first add, deleted on checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

impl Cart {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of a product, merging into an existing line when present.
    pub fn add(&mut self, product_id: &str, quantity: u32) {
        match self.items.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem::new(product_id, quantity)),
        }
        self.updated_at = Utc::now();
    }
}

/// A cart line enriched with catalog details for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
    pub product: Option<Product>,
}

/// A cart as presented to callers: lines with product details and a running total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub user_id: String,
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub updated_at: DateTime<Utc>,
}
