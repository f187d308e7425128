use thiserror::Error;

use crate::catalog::CatalogError;
use crate::domain::ProductId;
use crate::storage::StoreError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Catalog fetch failed: {0}")]
    CatalogFetch(#[from] CatalogError),
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    StockExhausted {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },
    #[error("Cart persistence failed: {0}")]
    Persistence(#[from] StoreError),
    #[error("Saved cart could not be read: {0}")]
    CorruptSnapshot(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
