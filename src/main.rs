mod domain;
mod ledger;
mod coupon_engine;
mod catalog;
mod cart;
mod checkout;
mod messages;
mod clients;
mod actors;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;

use tracing::{error, info, warn, Instrument};
use crate::app_system::{setup_tracing, ShopConfig, ShopSystem};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ShopConfig::load().map_err(|e| e.to_string())?;
    info!(
        nth_order = config.coupon.nth_order,
        discount_percent = config.coupon.discount_percent,
        "Starting shop with coupon policy"
    );

    // Create the entire shop system (starts all services)
    let system = ShopSystem::start(&config).await.map_err(|e| e.to_string())?;
    let shop = system.shop_client.clone();

    let products = system.catalog_client.list_products().await.map_err(|e| e.to_string())?;
    let Some(first_product) = products.first() else {
        warn!("Catalog is empty, nothing to demonstrate");
        return system.shutdown().await;
    };

    // Plain checkouts until the rolling counter earns a coupon
    for n in 1..=config.coupon.nth_order {
        let user_id = format!("user_{}", n);
        let span = tracing::info_span!("checkout", user_id = %user_id);
        async {
            shop.add_to_cart(user_id.clone(), first_product.id.clone(), 1)
                .await
                .map_err(|e| e.to_string())?;
            let order = shop.process_checkout(user_id.clone(), None).await.map_err(|e| e.to_string())?;
            info!(order_id = %order.id, total = order.total, "Order placed");
            Ok::<_, String>(())
        }
        .instrument(span)
        .await?;
    }

    let coupon = shop.get_active_coupon().await.map_err(|e| e.to_string())?;
    match &coupon {
        Some(coupon) => info!(coupon_code = %coupon.code, "Active coupon available"),
        None => warn!("No coupon was issued"),
    }

    // Redeem it on the next order
    if let Some(coupon) = coupon {
        let span = tracing::info_span!("redeeming_checkout");
        let result = async {
            shop.add_to_cart("user_redeem".into(), first_product.id.clone(), 2)
                .await
                .map_err(|e| e.to_string())?;
            if let Some(cart) = shop.view_cart("user_redeem".into()).await.map_err(|e| e.to_string())? {
                info!(lines = cart.lines.len(), total = cart.total, "Cart ready for checkout");
            }
            let validation = shop.validate_coupon(coupon.code.clone()).await.map_err(|e| e.to_string())?;
            info!(valid = validation.valid, discount_percent = validation.discount_percent, "Coupon checked");
            shop.process_checkout("user_redeem".into(), Some(coupon.code.clone()))
                .await
                .map_err(|e| e.to_string())
        }
        .instrument(span)
        .await;

        match result {
            Ok(order) => info!(
                order_id = %order.id,
                subtotal = order.subtotal,
                discount = order.discount,
                total = order.total,
                "Coupon redeemed"
            ),
            Err(e) => error!(error = %e, "Redeeming checkout failed"),
        }

        // A second attempt with the same code must be rejected
        shop.add_to_cart("user_again".into(), first_product.id.clone(), 1)
            .await
            .map_err(|e| e.to_string())?;
        if let Err(e) = shop.process_checkout("user_again".into(), Some(coupon.code)).await {
            info!(error = %e, "Reused coupon rejected as expected");
        }
    }

    // Admin issues a promotional code
    match shop.admin_issue_coupon(Some("WELCOME".into())).await {
        Ok(coupon) => info!(coupon_code = %coupon.code, "Admin coupon issued"),
        Err(e) => error!(error = %e, "Admin coupon rejected"),
    }

    let stats = shop.get_stats().await.map_err(|e| e.to_string())?;
    let summary = serde_json::to_string_pretty(&stats).map_err(|e| e.to_string())?;
    info!(
        total_orders = stats.total_orders,
        total_revenue = stats.total_revenue,
        total_discount_given = stats.total_discount_given,
        "Shop statistics"
    );
    println!("{}", summary);

    // Shutdown system gracefully
    drop(shop);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
