use tracing::{debug, instrument};

use crate::domain::{Product, ProductDraft};
use crate::error::ApiError;
use crate::rest_framework::ResourceClient;

/// Client for the product catalog.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, product);

impl ProductClient {
    /// Privileged.
    #[instrument(skip(self), fields(name = %draft.name))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        debug!("Sending request");
        self.inner.create(draft).await
    }

    /// Privileged. Replaces every field of the product.
    #[instrument(skip(self, draft))]
    pub async fn update_product(&self, id: u64, draft: ProductDraft) -> Result<Product, ApiError> {
        debug!("Sending request");
        self.inner.update(id, draft).await
    }

    /// Privileged.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: u64) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}
