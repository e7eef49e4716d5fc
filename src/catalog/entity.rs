use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Product, ProductCreate};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the catalog actor
    /// * `params` - Name, price and optional description
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, FrameworkError> {
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            description: params.description,
        })
    }

    /// Rejects blank names and prices that are negative or not finite.
    fn on_create(&mut self) -> Result<(), FrameworkError> {
        if self.name.trim().is_empty() {
            return Err(FrameworkError::Validation("Product name must not be empty".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(FrameworkError::Validation(format!("Invalid price: {}", self.price)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_create_validation() {
        let mut ok = Product::from_create_params("1".into(), ProductCreate::new("Mouse", 29.99)).unwrap();
        assert!(ok.on_create().is_ok());

        let mut free = Product::from_create_params("2".into(), ProductCreate::new("Sticker", 0.0)).unwrap();
        assert!(free.on_create().is_ok());

        let mut negative = Product::from_create_params("3".into(), ProductCreate::new("Refund", -1.0)).unwrap();
        assert!(matches!(negative.on_create(), Err(FrameworkError::Validation(_))));

        let mut nan = Product::from_create_params("4".into(), ProductCreate::new("Broken", f64::NAN)).unwrap();
        assert!(nan.on_create().is_err());

        let mut blank = Product::from_create_params("5".into(), ProductCreate::new("  ", 1.0)).unwrap();
        assert!(blank.on_create().is_err());
    }
}
