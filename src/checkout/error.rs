use thiserror::Error;

/// Errors that abort a checkout. None of them leave partial state behind.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty for user {0}")]
    EmptyCart(String),
    #[error("Invalid or expired coupon code: {0}")]
    InvalidCoupon(String),
    #[error("Coupon {0} could not be redeemed")]
    CouponRedemption(String),
    #[error("Catalog error: {0}")]
    CatalogError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
