use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use crate::cart::{self, CartError};
use crate::checkout::{CheckoutError, CheckoutOrchestrator};
use crate::clients::ShopClient;
use crate::coupon_engine::CouponError;
use crate::domain::{AdminStats, Cart, CartView, Coupon, CouponValidation, Order};
use crate::ledger::Ledger;
use crate::messages::{ShopRequest, ServiceResponse};

// =============================================================================
// SHOP SERVICE
// =============================================================================

/// Root actor that owns the ledger.
///
/// Requests are handled one at a time, so a checkout always runs to completion
/// before any other request sees the ledger.
pub struct ShopService {
    receiver: mpsc::Receiver<ShopRequest>,
    checkout: CheckoutOrchestrator,
    ledger: Ledger,
}

impl ShopService {
    pub fn new(buffer_size: usize, checkout: CheckoutOrchestrator) -> (Self, ShopClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            checkout,
            ledger: Ledger::new(),
        };
        (service, ShopClient::new(sender))
    }

    #[instrument(name = "shop_service", skip(self))]
    pub async fn run(mut self) {
        info!("ShopService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ShopRequest::AddToCart { user_id, product_id, quantity, respond_to } => {
                    self.handle_add_to_cart(user_id, product_id, quantity, respond_to).await;
                }
                ShopRequest::ViewCart { user_id, respond_to } => {
                    self.handle_view_cart(user_id, respond_to).await;
                }
                ShopRequest::Checkout { user_id, coupon_code, respond_to } => {
                    self.handle_checkout(user_id, coupon_code, respond_to).await;
                }
                ShopRequest::ValidateCoupon { code, respond_to } => {
                    self.handle_validate_coupon(code, respond_to);
                }
                ShopRequest::GetActiveCoupon { respond_to } => {
                    let _ = respond_to.send(Ok(self.checkout.engine().active_coupon(&self.ledger)));
                }
                ShopRequest::AdminIssueCoupon { custom_code, respond_to } => {
                    self.handle_admin_issue_coupon(custom_code, respond_to);
                }
                ShopRequest::GetStats { respond_to } => {
                    let _ = respond_to.send(Ok(self.stats()));
                }
                ShopRequest::Shutdown => {
                    info!("ShopService shutting down");
                    break;
                }
            }
        }
        info!("ShopService stopped");
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_add_to_cart(
        &mut self,
        user_id: String,
        product_id: String,
        quantity: u32,
        respond_to: ServiceResponse<Cart, CartError>,
    ) {
        debug!("Processing add_to_cart request");
        let result = cart::add_to_cart(&mut self.ledger, self.checkout.catalog(), &user_id, &product_id, quantity).await;
        if let Err(e) = &result {
            warn!(error = %e, "Add to cart failed");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_view_cart(&self, user_id: String, respond_to: ServiceResponse<Option<CartView>, CartError>) {
        debug!("Processing view_cart request");
        let result = cart::view_cart(&self.ledger, self.checkout.catalog(), &user_id).await;
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_checkout(
        &mut self,
        user_id: String,
        coupon_code: Option<String>,
        respond_to: ServiceResponse<Order, CheckoutError>,
    ) {
        info!("Processing checkout request");
        let result = self
            .checkout
            .process(&mut self.ledger, &user_id, coupon_code.as_deref())
            .await;
        debug!(
            global_order_count = self.ledger.global_order_count(),
            orders_since_last_redemption = self.ledger.orders_since_last_redemption(),
            "Counters after checkout"
        );
        let _ = respond_to.send(result);
    }

    #[instrument(fields(coupon_code = %code), skip(self, code, respond_to))]
    fn handle_validate_coupon(&self, code: String, respond_to: ServiceResponse<CouponValidation, CouponError>) {
        let validation = self.checkout.engine().validate(&self.ledger, code.trim());
        debug!(valid = validation.valid, "Coupon validated");
        let _ = respond_to.send(Ok(validation));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_admin_issue_coupon(&mut self, custom_code: Option<String>, respond_to: ServiceResponse<Coupon, CouponError>) {
        info!("Processing admin_issue_coupon request");
        let result = self.checkout.engine().issue(&mut self.ledger, custom_code.as_deref());
        if let Err(e) = &result {
            warn!(error = %e, "Admin coupon issuance rejected");
        }
        let _ = respond_to.send(result);
    }

    /// Folds the order and coupon lists into the admin statistics.
    fn stats(&self) -> AdminStats {
        let orders = self.ledger.orders();
        AdminStats {
            active_coupon: self.checkout.engine().active_coupon(&self.ledger),
            total_items_sold: orders.iter().map(Order::item_count).sum(),
            total_revenue: orders.iter().map(|o| o.total).sum(),
            total_discount_given: orders.iter().map(|o| o.discount).sum(),
            all_coupons: self.ledger.coupons().to_vec(),
            total_orders: self.ledger.global_order_count(),
        }
    }
}
