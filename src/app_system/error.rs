use thiserror::Error;

use crate::cart_actor::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StoreError;

/// Errors surfaced while starting, driving or stopping the whole system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
