use async_trait::async_trait;
use tracing::{debug, instrument};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::catalog::{Catalog, CatalogError};
use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogEntry, ProductCreate, ProductPatch};
use crate::domain::{Product, ProductId, Stock};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<CatalogEntry>,
}

impl_basic_client!(CatalogClient, CatalogEntry, ProductId, ProductPatch, CatalogError, catalog_entry);

impl CatalogClient {
    /// Registers a product and its starting stock, returning the assigned id.
    #[instrument(skip(self))]
    pub async fn create_product(&self, payload: ProductCreate) -> Result<ProductId, CatalogError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(|e| match e {
            FrameworkError::Rejected(reason) => CatalogError::Rejected(reason),
            other => CatalogError::ActorCommunicationError(other.to_string()),
        })
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, CatalogError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CatalogAction::CheckStock).await {
            Ok(CatalogActionResult::StockLevel(level)) => Ok(level),
            Err(FrameworkError::NotFound(_)) => Err(CatalogError::NotFound(id)),
            Err(FrameworkError::Rejected(reason)) => Err(CatalogError::Rejected(reason)),
            Err(e) => Err(CatalogError::ActorCommunicationError(e.to_string())),
        }
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get_catalog_entry(id)
            .await?
            .map(|entry| entry.product)
            .ok_or(CatalogError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let amount = self.check_stock(id).await?;
        Ok(Stock::new(id, amount))
    }
}
