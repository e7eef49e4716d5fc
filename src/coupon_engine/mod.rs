//! Coupon issuance, validation and redemption.
//!
//! The engine only carries its policy. All coupon state lives in the
//! [`Ledger`] passed to each call, and the engine is the only writer of it.

mod code;
pub mod error;

pub use code::generate_code;
pub use error::*;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::domain::{Coupon, CouponValidation};
use crate::ledger::Ledger;

/// Tunables for automatic and manual issuance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CouponPolicy {
    /// Checkouts since the last redemption that trigger a new coupon.
    pub nth_order: u64,
    pub discount_percent: u32,
    /// Shortest custom code accepted on the admin path.
    pub min_custom_code_len: usize,
}

impl Default for CouponPolicy {
    fn default() -> Self {
        Self {
            nth_order: 3,
            discount_percent: 10,
            min_custom_code_len: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CouponEngine {
    policy: CouponPolicy,
}

impl CouponEngine {
    pub fn new(policy: CouponPolicy) -> Self {
        Self { policy }
    }

    /// A coupon is due each time the rolling counter lands on a positive
    /// multiple of `nth_order`.
    pub fn is_due(&self, orders_since_last_redemption: u64) -> bool {
        orders_since_last_redemption > 0
            && self.policy.nth_order > 0
            && orders_since_last_redemption % self.policy.nth_order == 0
    }

    /// Issues a coupon when the rolling counter says one is due.
    ///
    /// Returns `None` when no coupon is due. The code is derived from
    /// `global_order_count`.
    #[instrument(skip(self, ledger))]
    pub fn issue_if_due(
        &self,
        ledger: &mut Ledger,
        orders_since_last_redemption: u64,
        global_order_count: u64,
    ) -> Option<Coupon> {
        if !self.is_due(orders_since_last_redemption) {
            debug!("No coupon due");
            return None;
        }
        let code = generate_code(global_order_count, self.policy.discount_percent);
        Some(self.replace_active(ledger, code))
    }

    /// Issues a coupon regardless of the counters.
    ///
    /// A custom code is trimmed and upper-cased; without one, a code is
    /// generated from the current global order count.
    #[instrument(skip(self, ledger))]
    pub fn issue(&self, ledger: &mut Ledger, custom_code: Option<&str>) -> Result<Coupon, CouponError> {
        let code = match custom_code {
            Some(raw) => {
                let code = raw.trim().to_uppercase();
                if code.chars().count() < self.policy.min_custom_code_len {
                    return Err(CouponError::InvalidAdminCode {
                        code,
                        min_len: self.policy.min_custom_code_len,
                    });
                }
                code
            }
            None => generate_code(ledger.global_order_count(), self.policy.discount_percent),
        };
        Ok(self.replace_active(ledger, code))
    }

    /// Invalidates the current active coupon, then appends a new valid one.
    fn replace_active(&self, ledger: &mut Ledger, code: String) -> Coupon {
        if let Some(previous) = ledger.active_coupon_mut() {
            previous.is_valid = false;
            info!(coupon_code = %previous.code, "Previous coupon invalidated");
        }
        let coupon = Coupon::new(code, self.policy.discount_percent);
        ledger.append_coupon(coupon.clone());
        info!(coupon_code = %coupon.code, discount_percent = coupon.discount_percent, "Coupon issued");
        coupon
    }

    pub fn validate(&self, ledger: &Ledger, code: &str) -> CouponValidation {
        match ledger.valid_coupon(code) {
            Some(coupon) => CouponValidation {
                valid: true,
                discount_percent: coupon.discount_percent,
            },
            None => CouponValidation::invalid(),
        }
    }

    /// Marks the valid coupon with `code` as used. Returns `false` when there
    /// is nothing to redeem, including a second redemption of the same code.
    #[instrument(skip(self, ledger))]
    pub fn redeem(&self, ledger: &mut Ledger, code: &str) -> bool {
        match ledger.valid_coupon_mut(code) {
            Some(coupon) => {
                coupon.is_valid = false;
                coupon.used_at = Some(Utc::now());
                info!("Coupon redeemed");
                true
            }
            None => {
                debug!("No valid coupon to redeem");
                false
            }
        }
    }

    pub fn active_coupon(&self, ledger: &Ledger) -> Option<Coupon> {
        ledger.active_coupon().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_count(ledger: &Ledger) -> usize {
        ledger.coupons().iter().filter(|c| c.is_valid).count()
    }

    #[test]
    fn test_not_due_before_threshold() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();

        assert!(engine.issue_if_due(&mut ledger, 0, 0).is_none());
        assert!(engine.issue_if_due(&mut ledger, 1, 1).is_none());
        assert!(engine.issue_if_due(&mut ledger, 2, 2).is_none());
        assert!(ledger.coupons().is_empty());
    }

    #[test]
    fn test_issues_on_threshold_and_its_multiples() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();

        let first = engine.issue_if_due(&mut ledger, 3, 3).expect("due at 3");
        assert_eq!(first.code, "SAVE10-VCHO");
        assert_eq!(first.discount_percent, 10);
        assert!(first.is_valid);

        assert!(engine.issue_if_due(&mut ledger, 4, 4).is_none());
        assert!(engine.issue_if_due(&mut ledger, 5, 5).is_none());
        let second = engine.issue_if_due(&mut ledger, 6, 6).expect("due at 6");
        assert_eq!(second.code, "SAVE10-AEHO");
        assert_eq!(ledger.coupons().len(), 2);
    }

    #[test]
    fn test_issuance_keeps_single_active_coupon() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();

        for n in 1..=30 {
            engine.issue_if_due(&mut ledger, n, n);
            assert!(valid_count(&ledger) <= 1);
        }
        assert_eq!(ledger.coupons().len(), 10);
        assert_eq!(valid_count(&ledger), 1);
        assert_eq!(engine.active_coupon(&ledger).map(|c| c.code), Some(generate_code(30, 10)));
        // Superseded coupons are invalid but never marked as used.
        assert!(ledger.coupons().iter().filter(|c| !c.is_valid).all(|c| c.used_at.is_none()));
    }

    #[test]
    fn test_custom_threshold() {
        let engine = CouponEngine::new(CouponPolicy {
            nth_order: 5,
            discount_percent: 20,
            ..CouponPolicy::default()
        });
        let mut ledger = Ledger::new();

        assert!(engine.issue_if_due(&mut ledger, 3, 3).is_none());
        let coupon = engine.issue_if_due(&mut ledger, 5, 5).expect("due at 5");
        assert!(coupon.code.starts_with("SAVE20-"));
        assert_eq!(coupon.discount_percent, 20);
    }

    #[test]
    fn test_validate() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();
        let coupon = engine.issue_if_due(&mut ledger, 3, 3).unwrap();

        assert_eq!(
            engine.validate(&ledger, &coupon.code),
            CouponValidation { valid: true, discount_percent: 10 }
        );
        assert_eq!(engine.validate(&ledger, "INVALID-CODE"), CouponValidation::invalid());
        // Codes match exactly.
        assert!(!engine.validate(&ledger, &coupon.code.to_lowercase()).valid);
    }

    #[test]
    fn test_superseded_coupon_no_longer_validates() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();
        let first = engine.issue_if_due(&mut ledger, 3, 3).unwrap();
        let second = engine.issue_if_due(&mut ledger, 6, 6).unwrap();

        assert!(!engine.validate(&ledger, &first.code).valid);
        assert!(engine.validate(&ledger, &second.code).valid);
    }

    #[test]
    fn test_redeem_is_single_use() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();
        let coupon = engine.issue_if_due(&mut ledger, 3, 3).unwrap();

        assert!(engine.redeem(&mut ledger, &coupon.code));
        assert!(!engine.redeem(&mut ledger, &coupon.code));
        assert!(!engine.validate(&ledger, &coupon.code).valid);
        assert!(engine.active_coupon(&ledger).is_none());

        let stored = &ledger.coupons()[0];
        assert!(!stored.is_valid);
        assert!(stored.used_at.is_some());
    }

    #[test]
    fn test_redeem_unknown_code() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();
        assert!(!engine.redeem(&mut ledger, "INVALID-CODE"));
    }

    #[test]
    fn test_admin_issue_with_custom_code_supersedes_active() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();
        let generated = engine.issue_if_due(&mut ledger, 3, 3).unwrap();

        let promo = engine.issue(&mut ledger, Some(" promo ")).unwrap();
        assert_eq!(promo.code, "PROMO");
        assert!(!engine.validate(&ledger, &generated.code).valid);
        assert_eq!(engine.active_coupon(&ledger).map(|c| c.code), Some("PROMO".to_string()));
        assert_eq!(valid_count(&ledger), 1);
    }

    #[test]
    fn test_admin_issue_rejects_short_code() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();
        let active = engine.issue_if_due(&mut ledger, 3, 3).unwrap();

        let err = engine.issue(&mut ledger, Some(" ab ")).unwrap_err();
        assert_eq!(err, CouponError::InvalidAdminCode { code: "AB".to_string(), min_len: 3 });
        // Nothing changed.
        assert_eq!(ledger.coupons().len(), 1);
        assert!(engine.validate(&ledger, &active.code).valid);
    }

    #[test]
    fn test_admin_issue_generates_code_from_order_count() {
        let engine = CouponEngine::default();
        let mut ledger = Ledger::new();
        for _ in 0..4 {
            ledger.increment_global_order_count();
        }

        let coupon = engine.issue(&mut ledger, None).unwrap();
        assert_eq!(coupon.code, "SAVE10-CDHO");
    }
}
