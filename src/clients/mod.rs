use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};
use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::coupon_engine::CouponError;
use crate::domain::{AdminStats, Cart, CartView, Coupon, CouponValidation, Order};
use crate::messages::ShopRequest;

#[macro_use]
mod macros;
mod catalog_client;

pub use catalog_client::CatalogClient;

// =============================================================================
// Macro for mailbox clients
// =============================================================================

macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// Shop Client
// =============================================================================

/// Handle to the shop service. Cheap to clone; every clone talks to the same ledger.
#[derive(Clone)]
pub struct ShopClient {
    sender: mpsc::Sender<ShopRequest>,
}

impl ShopClient {
    pub fn new(sender: mpsc::Sender<ShopRequest>) -> Self {
        Self { sender }
    }

    /// Asks the service to stop after the requests already queued.
    pub async fn shutdown(&self) -> Result<(), String> {
        info!("Sending shutdown");
        self.sender.send(ShopRequest::Shutdown).await.map_err(|e| e.to_string())
    }
}

client_method!(ShopClient => fn add_to_cart(user_id: String, product_id: String, quantity: u32) -> Cart as ShopRequest::AddToCart, Error = CartError);
client_method!(ShopClient => fn view_cart(user_id: String) -> Option<CartView> as ShopRequest::ViewCart, Error = CartError);
client_method!(ShopClient => fn process_checkout(user_id: String, coupon_code: Option<String>) -> Order as ShopRequest::Checkout, Error = CheckoutError);
client_method!(ShopClient => fn validate_coupon(code: String) -> CouponValidation as ShopRequest::ValidateCoupon, Error = CouponError);
client_method!(ShopClient => fn get_active_coupon() -> Option<Coupon> as ShopRequest::GetActiveCoupon, Error = CouponError);
client_method!(ShopClient => fn admin_issue_coupon(custom_code: Option<String>) -> Coupon as ShopRequest::AdminIssueCoupon, Error = CouponError);
client_method!(ShopClient => fn get_stats() -> AdminStats as ShopRequest::GetStats, Error = CouponError);
