use tracing::{debug, instrument};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::catalog::CatalogError;
use crate::domain::{Product, ProductCreate};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(CatalogClient, Product, CatalogError, product);

impl CatalogClient {
    #[instrument(skip(self), fields(name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Validation(msg) => CatalogError::ValidationError(msg),
            other => CatalogError::ActorCommunicationError(other.to_string()),
        })
    }

    pub async fn product_exists(&self, id: &str) -> Result<bool, CatalogError> {
        Ok(self.get_product(id.to_string()).await?.is_some())
    }

    /// Price of a product, or `None` when the id is unknown.
    pub async fn price_of(&self, id: &str) -> Result<Option<f64>, CatalogError> {
        Ok(self.get_product(id.to_string()).await?.map(|p| p.price))
    }
}
