//! In-memory state for the shop: carts, orders, coupons and the two order counters.
//!
//! The ledger holds no business rules. The coupon engine and the checkout
//! orchestrator receive it by reference, so every test can build its own.

use std::collections::HashMap;

use crate::domain::{Cart, Coupon, Order};

#[derive(Debug, Default)]
pub struct Ledger {
    carts: HashMap<String, Cart>,
    orders: Vec<Order>,
    coupons: Vec<Coupon>,
    global_order_count: u64,
    orders_since_last_redemption: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Carts ---

    pub fn cart(&self, user_id: &str) -> Option<&Cart> {
        self.carts.get(user_id)
    }

    pub fn set_cart(&mut self, cart: Cart) {
        self.carts.insert(cart.user_id.clone(), cart);
    }

    pub fn delete_cart(&mut self, user_id: &str) -> Option<Cart> {
        self.carts.remove(user_id)
    }

    // --- Orders ---

    pub fn append_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    // --- Coupons ---

    pub fn append_coupon(&mut self, coupon: Coupon) {
        self.coupons.push(coupon);
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn active_coupon(&self) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.is_valid)
    }

    pub fn active_coupon_mut(&mut self) -> Option<&mut Coupon> {
        self.coupons.iter_mut().find(|c| c.is_valid)
    }

    /// Finds the valid coupon carrying `code`. Superseded or redeemed coupons
    /// with the same code are skipped.
    pub fn valid_coupon(&self, code: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.is_valid && c.code == code)
    }

    pub fn valid_coupon_mut(&mut self, code: &str) -> Option<&mut Coupon> {
        self.coupons.iter_mut().find(|c| c.is_valid && c.code == code)
    }

    // --- Counters ---

    pub fn global_order_count(&self) -> u64 {
        self.global_order_count
    }

    pub fn orders_since_last_redemption(&self) -> u64 {
        self.orders_since_last_redemption
    }

    pub fn increment_global_order_count(&mut self) -> u64 {
        self.global_order_count += 1;
        self.global_order_count
    }

    pub fn increment_orders_since_last_redemption(&mut self) -> u64 {
        self.orders_since_last_redemption += 1;
        self.orders_since_last_redemption
    }

    pub fn reset_orders_since_last_redemption(&mut self) {
        self.orders_since_last_redemption = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_roundtrip() {
        let mut ledger = Ledger::new();
        assert!(ledger.cart("user_1").is_none());

        let mut cart = Cart::new("user_1");
        cart.add("1", 2);
        ledger.set_cart(cart);
        assert_eq!(ledger.cart("user_1").map(|c| c.items.len()), Some(1));

        assert!(ledger.delete_cart("user_1").is_some());
        assert!(ledger.cart("user_1").is_none());
        assert!(ledger.delete_cart("user_1").is_none());
    }

    #[test]
    fn test_counters_move_independently() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.increment_global_order_count(), 1);
        assert_eq!(ledger.increment_global_order_count(), 2);
        assert_eq!(ledger.increment_orders_since_last_redemption(), 1);

        ledger.reset_orders_since_last_redemption();
        assert_eq!(ledger.orders_since_last_redemption(), 0);
        assert_eq!(ledger.global_order_count(), 2);
    }

    #[test]
    fn test_valid_coupon_lookup_skips_invalidated_duplicates() {
        let mut ledger = Ledger::new();
        let mut old = Coupon::new("PROMO", 10);
        old.is_valid = false;
        ledger.append_coupon(old);
        ledger.append_coupon(Coupon::new("PROMO", 15));

        let found = ledger.valid_coupon("PROMO").expect("valid coupon");
        assert_eq!(found.discount_percent, 15);
        assert_eq!(ledger.active_coupon().map(|c| c.discount_percent), Some(15));
        assert!(ledger.valid_coupon("OTHER").is_none());
    }
}
