use tracing::{error, info, instrument};
use crate::actor_framework::ResourceActor;
use crate::actors::ShopService;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutOrchestrator;
use crate::clients::{CatalogClient, ShopClient};
use crate::coupon_engine::CouponEngine;
use crate::domain::Product;

use super::ShopConfig;

/// Id generator yielding `"1"`, `"2"`, ...
pub fn sequential_ids() -> impl FnMut() -> String + Send + Sync + 'static {
    let mut next = 0u64;
    move || {
        next += 1;
        next.to_string()
    }
}

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct ShopSystem {
    pub shop_client: ShopClient,
    pub catalog_client: CatalogClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Starts the catalog actor, seeds it, then starts the shop service with
    /// the catalog client injected.
    #[instrument(name = "shop_system", skip(config))]
    pub async fn start(config: &ShopConfig) -> Result<Self, CatalogError> {
        info!("Starting shop system");
        let mailbox_size = config.service.mailbox_size;

        // 1. Catalog (no dependencies)
        let (catalog_actor, catalog_resource_client) = ResourceActor::<Product>::new(mailbox_size, sequential_ids());
        let catalog_client = CatalogClient::new(catalog_resource_client);
        let catalog_handle = tokio::spawn(catalog_actor.run());

        for product in config.catalog.iter().cloned() {
            catalog_client.create_product(product).await?;
        }
        info!(products = config.catalog.len(), "Catalog seeded");

        // 2. Shop service with the catalog injected
        let engine = CouponEngine::new(config.coupon.clone());
        let checkout = CheckoutOrchestrator::new(engine, catalog_client.clone());
        let (shop_service, shop_client) = ShopService::new(mailbox_size, checkout);
        let shop_handle = tokio::spawn(shop_service.run());

        info!("Shop system started successfully");

        Ok(Self {
            shop_client,
            catalog_client,
            handles: vec![shop_handle, catalog_handle],
        })
    }

    /// Stops the shop service first, then lets the catalog actor drain once
    /// its last client is gone.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop system");

        // The shop service holds its own catalog client, so it must stop first.
        self.shop_client.shutdown().await?;
        drop(self.shop_client);
        drop(self.catalog_client);

        let mut failed = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                failed = Some(format!("Actor task failed: {:?}", e));
            }
        }

        match failed {
            Some(e) => Err(e),
            None => {
                info!("Shop system shutdown complete");
                Ok(())
            }
        }
    }
}
