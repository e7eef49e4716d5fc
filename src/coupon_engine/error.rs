use thiserror::Error;

/// Errors raised when issuing coupons on demand.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponError {
    #[error("Invalid coupon code {code:?}: must be at least {min_len} characters")]
    InvalidAdminCode { code: String, min_len: usize },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
