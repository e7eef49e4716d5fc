//! A single checkout transaction over the ledger.
//!
//! Pricing and coupon validation run before anything is written, so a
//! rejected checkout leaves counters, coupons, orders and the cart untouched.

pub mod error;

pub use error::*;

use tracing::{info, instrument, warn};

use crate::clients::CatalogClient;
use crate::coupon_engine::CouponEngine;
use crate::domain::Order;
use crate::ledger::Ledger;

#[derive(Clone)]
pub struct CheckoutOrchestrator {
    engine: CouponEngine,
    catalog: CatalogClient,
}

impl CheckoutOrchestrator {
    pub fn new(engine: CouponEngine, catalog: CatalogClient) -> Self {
        Self { engine, catalog }
    }

    pub fn engine(&self) -> &CouponEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Turns the user's cart into an order, applying `coupon_code` when given.
    ///
    /// A blank code counts as no code.
    #[instrument(skip(self, ledger))]
    pub async fn process(
        &self,
        ledger: &mut Ledger,
        user_id: &str,
        coupon_code: Option<&str>,
    ) -> Result<Order, CheckoutError> {
        // Step 1: Load cart
        let cart = match ledger.cart(user_id) {
            Some(cart) if !cart.is_empty() => cart.clone(),
            _ => {
                warn!("Checkout rejected: cart is empty");
                return Err(CheckoutError::EmptyCart(user_id.to_string()));
            }
        };

        // Step 2: Price
        let mut subtotal = 0.0;
        for item in &cart.items {
            let price = self
                .catalog
                .price_of(&item.product_id)
                .await
                .map_err(|e| CheckoutError::CatalogError(e.to_string()))?;
            let price = price.unwrap_or_else(|| {
                warn!(product_id = %item.product_id, "Unknown product in cart priced at zero");
                0.0
            });
            subtotal += price * f64::from(item.quantity);
        }

        // Step 3: Coupon
        let coupon_code = coupon_code.map(str::trim).filter(|code| !code.is_empty());
        let mut discount = 0.0;
        if let Some(code) = coupon_code {
            let validation = self.engine.validate(ledger, code);
            if !validation.valid {
                warn!(coupon_code = %code, "Checkout rejected: invalid coupon");
                return Err(CheckoutError::InvalidCoupon(code.to_string()));
            }
            if !self.engine.redeem(ledger, code) {
                warn!(coupon_code = %code, "Checkout rejected: coupon redemption failed");
                return Err(CheckoutError::CouponRedemption(code.to_string()));
            }
            discount = subtotal * f64::from(validation.discount_percent) / 100.0;
        }

        // Step 4: Advance counters
        let global_order_count = ledger.increment_global_order_count();
        let orders_since = ledger.increment_orders_since_last_redemption();

        // Step 5: Issuance check
        if let Some(coupon) = self.engine.issue_if_due(ledger, orders_since, global_order_count) {
            info!(coupon_code = %coupon.code, orders_since, "Checkout earned a new coupon");
        }

        // Step 6: Only a redemption resets the rolling counter
        if coupon_code.is_some() {
            ledger.reset_orders_since_last_redemption();
        }

        // Step 7: Create order
        let order = Order::new(
            format!("order_{}", global_order_count),
            user_id,
            cart.items,
            subtotal,
            discount,
            coupon_code.map(str::to_string),
        );
        ledger.append_order(order.clone());

        // Step 8: Clear cart
        ledger.delete_cart(user_id);

        info!(
            order_id = %order.id,
            subtotal = order.subtotal,
            discount = order.discount,
            total = order.total,
            "Order created"
        );
        Ok(order)
    }
}
