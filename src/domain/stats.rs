use serde::Serialize;

use super::Coupon;

/// Aggregate view over all orders and coupons, computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub active_coupon: Option<Coupon>,
    pub total_items_sold: u64,
    pub total_revenue: f64,
    pub total_discount_given: f64,
    pub all_coupons: Vec<Coupon>,
    pub total_orders: u64,
}
