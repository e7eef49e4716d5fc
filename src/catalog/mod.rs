//! Product catalog served by a `ResourceActor<Product>`.

pub mod entity;
pub mod error;

pub use error::*;

use crate::domain::ProductCreate;

/// The catalog a fresh shop starts with. Ids are assigned `"1"`, `"2"`, ... in order.
pub fn default_products() -> Vec<ProductCreate> {
    vec![
        ProductCreate::new("Laptop", 999.99).with_description("High-performance laptop"),
        ProductCreate::new("Mouse", 29.99).with_description("Wireless mouse"),
        ProductCreate::new("Keyboard", 79.99).with_description("Mechanical keyboard"),
        ProductCreate::new("Monitor", 299.99).with_description("27-inch 4K monitor"),
        ProductCreate::new("Headphones", 149.99).with_description("Noise-cancelling headphones"),
        ProductCreate::new("Webcam", 89.99).with_description("HD webcam with microphone"),
    ]
}
