//! Durable key-value storage for the cart snapshot.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::Cart;

/// Errors raised by a [`CartStore`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Snapshot encoding error: {0}")]
    Encode(String),
}

/// Blob store addressed by a single string key.
pub trait CartStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError>;
}

/// Outcome of reading the saved cart back.
#[derive(Debug)]
pub enum Restored {
    Missing,
    Loaded(Cart),
    Unreadable(String),
}

/// Serializes `cart` and writes it under `key`.
#[instrument(skip(store, cart), fields(lines = cart.len()))]
pub fn save_cart(store: &dyn CartStore, key: &str, cart: &Cart) -> Result<(), StoreError> {
    let blob = serde_json::to_string(cart).map_err(|e| StoreError::Encode(e.to_string()))?;
    store.set(key, &blob)?;
    debug!(bytes = blob.len(), "Cart snapshot written");
    Ok(())
}

/// Reads the snapshot under `key`. Read and decode failures are folded into
/// [`Restored::Unreadable`] so start-up can always fall back to an empty cart.
#[instrument(skip(store))]
pub fn load_cart(store: &dyn CartStore, key: &str) -> Restored {
    match store.get(key) {
        Ok(None) => Restored::Missing,
        Ok(Some(blob)) => match serde_json::from_str::<Cart>(&blob) {
            Ok(cart) => Restored::Loaded(cart),
            Err(e) => Restored::Unreadable(e.to_string()),
        },
        Err(e) => Restored::Unreadable(e.to_string()),
    }
}
