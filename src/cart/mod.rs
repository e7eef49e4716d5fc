//! Cart collaborator: quantity-merging adds and catalog-enriched views.

pub mod error;

pub use error::*;

use tracing::{info, instrument};

use crate::catalog::CatalogError;
use crate::clients::CatalogClient;
use crate::domain::{Cart, CartLine, CartView};
use crate::ledger::Ledger;

/// Adds `quantity` units of a product to the user's cart, creating the cart on first use.
#[instrument(skip(ledger, catalog))]
pub async fn add_to_cart(
    ledger: &mut Ledger,
    catalog: &CatalogClient,
    user_id: &str,
    product_id: &str,
    quantity: u32,
) -> Result<Cart, CartError> {
    if quantity == 0 {
        return Err(CartError::InvalidQuantity(quantity));
    }
    let exists = catalog
        .product_exists(product_id)
        .await
        .map_err(|e| CartError::CatalogError(e.to_string()))?;
    if !exists {
        return Err(CartError::ProductNotFound(product_id.to_string()));
    }

    let mut cart = ledger.cart(user_id).cloned().unwrap_or_else(|| Cart::new(user_id));
    cart.add(product_id, quantity);
    ledger.set_cart(cart.clone());
    info!(items = cart.items.len(), "Cart updated");
    Ok(cart)
}

/// The user's cart with product details, or `None` when there is no cart.
pub async fn view_cart(
    ledger: &Ledger,
    catalog: &CatalogClient,
    user_id: &str,
) -> Result<Option<CartView>, CartError> {
    let Some(cart) = ledger.cart(user_id) else {
        return Ok(None);
    };
    let lines = enrich_lines(catalog, cart)
        .await
        .map_err(|e| CartError::CatalogError(e.to_string()))?;
    Ok(Some(CartView {
        user_id: cart.user_id.clone(),
        total: lines_total(&lines),
        lines,
        updated_at: cart.updated_at,
    }))
}

/// Looks up every cart item in the catalog. Unknown products enrich to `None`.
pub async fn enrich_lines(catalog: &CatalogClient, cart: &Cart) -> Result<Vec<CartLine>, CatalogError> {
    let mut lines = Vec::with_capacity(cart.items.len());
    for item in &cart.items {
        let product = catalog.get_product(item.product_id.clone()).await?;
        lines.push(CartLine {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            product,
        });
    }
    Ok(lines)
}

/// Sum of price times quantity. Lines without a product count as zero.
pub fn lines_total(lines: &[CartLine]) -> f64 {
    lines
        .iter()
        .filter_map(|line| line.product.as_ref().map(|p| p.price * f64::from(line.quantity)))
        .sum()
}
