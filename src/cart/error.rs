use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Catalog error: {0}")]
    CatalogError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
