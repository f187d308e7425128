use std::sync::Arc;
use tracing::{error, info, instrument};
use crate::cart_actor::CartService;
use crate::catalog_actor;
use crate::clients::{CartClient, CatalogClient};
use crate::config::CartConfig;
use crate::notify::Notifier;
use crate::storage::CartStore;
use super::SystemError;

/// Owns the running actors: the in-process catalog and the cart service.
///
/// **Startup Order:**
/// 1. Start the catalog actor (no dependencies)
/// 2. Start the cart service with a catalog client injected
pub struct CartSystem {
    pub cart_client: CartClient,
    pub catalog_client: CatalogClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    #[instrument(name = "cart_system", skip_all, fields(storage_key = %config.storage_key))]
    pub fn start(config: &CartConfig, store: Arc<dyn CartStore>, notifier: Arc<dyn Notifier>) -> Self {
        info!("Starting cart system");
        let mut handles = Vec::new();

        let (catalog_actor, catalog_client) = catalog_actor::new(config.buffer_size.max(1));
        handles.push(tokio::spawn(catalog_actor.run()));

        let (cart_service, cart_client) =
            CartService::new(config, Arc::new(catalog_client.clone()), store, notifier);
        handles.push(tokio::spawn(cart_service.run()));

        info!("Cart system started");
        Self {
            cart_client,
            catalog_client,
            handles,
        }
    }

    /// Stops the cart service, then lets the catalog actor wind down once its
    /// last client is gone. Clones of `catalog_client` held elsewhere must be
    /// dropped first or the catalog keeps running.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down cart system");

        if let Err(e) = self.cart_client.shutdown().await {
            error!(error = %e, "Cart service already stopped");
        }
        drop(self.cart_client);
        drop(self.catalog_client);

        let mut first_failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                first_failure.get_or_insert_with(|| SystemError::TaskFailed(e.to_string()));
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => {
                info!("Cart system shutdown complete");
                Ok(())
            }
        }
    }
}
