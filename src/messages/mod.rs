use tokio::sync::oneshot;
use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::coupon_engine::CouponError;
use crate::domain::{AdminStats, Cart, CartView, Coupon, CouponValidation, Order};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests handled by the shop service. Each variant carries its parameters
/// and a oneshot channel for the reply.
#[derive(Debug)]
pub enum ShopRequest {
    AddToCart {
        user_id: String,
        product_id: String,
        quantity: u32,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    ViewCart {
        user_id: String,
        respond_to: ServiceResponse<Option<CartView>, CartError>,
    },
    Checkout {
        user_id: String,
        coupon_code: Option<String>,
        respond_to: ServiceResponse<Order, CheckoutError>,
    },
    ValidateCoupon {
        code: String,
        respond_to: ServiceResponse<CouponValidation, CouponError>,
    },
    GetActiveCoupon {
        respond_to: ServiceResponse<Option<Coupon>, CouponError>,
    },
    AdminIssueCoupon {
        custom_code: Option<String>,
        respond_to: ServiceResponse<Coupon, CouponError>,
    },
    GetStats {
        respond_to: ServiceResponse<AdminStats, CouponError>,
    },
    Shutdown,
}
