use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single-use discount coupon.
///
/// Coupons are never deleted. A coupon stops being valid either when it is
/// redeemed (`used_at` is set) or when a newer coupon supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coupon {
    pub code: String,
    pub discount_percent: u32,
    pub created_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub is_valid: bool,
}

impl Coupon {
    pub fn new(code: impl Into<String>, discount_percent: u32) -> Self {
        Self {
            code: code.into(),
            discount_percent,
            created_at: Utc::now(),
            used_at: None,
            is_valid: true,
        }
    }
}

/// Outcome of checking a code against the current coupon set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CouponValidation {
    pub valid: bool,
    pub discount_percent: u32,
}

impl CouponValidation {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            discount_percent: 0,
        }
    }
}
