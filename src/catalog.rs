//! Read-only catalog lookups the cart depends on.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Product, ProductId, Stock};

/// Errors that can occur while reading the catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Catalog rejected request: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Source of product and stock records, keyed by product id.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}
