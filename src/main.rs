mod domain;
mod clients;
mod messages;
mod config;
mod catalog;
mod storage;
mod notify;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod catalog_actor;
mod cart_actor;

use std::sync::Arc;

use tracing::{info, Instrument};
use crate::app_system::{setup_tracing, CartSystem, SystemError};
use crate::catalog_actor::ProductCreate;
use crate::config::CartConfig;
use crate::domain::UpdateProductAmount;
use crate::notify::TracingNotifier;
use crate::storage::FileStore;

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CartConfig::from_env()?;
    info!(storage_key = %config.storage_key, data_dir = %config.data_dir.display(), "Starting cart demo");

    let store = Arc::new(FileStore::open(&config.data_dir)?);
    let system = CartSystem::start(&config, store, Arc::new(TracingNotifier));

    let span = tracing::info_span!("catalog_seeding");
    let (sneaker, boot) = async {
        let sneaker = system.catalog_client.create_product(ProductCreate {
            title: "Tênis de Caminhada Leve Confortável".to_string(),
            price: 179.9,
            image: "tenis1.jpg".to_string(),
            stock: 5,
        }).await?;
        let boot = system.catalog_client.create_product(ProductCreate {
            title: "Bota Couro Marrom".to_string(),
            price: 259.0,
            image: "bota1.jpg".to_string(),
            stock: 0,
        }).await?;
        Ok::<_, SystemError>((sneaker, boot))
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("shopping");
    async {
        let cart = &system.cart_client;
        cart.add_product(sneaker).await?;
        cart.add_product(sneaker).await?;
        // Above the available stock: refused with a warning.
        cart.update_product_amount(UpdateProductAmount::new(sneaker, 10)).await?;
        cart.update_product_amount(UpdateProductAmount::new(sneaker, 3)).await?;
        // Sold out: warned, added anyway unless the abort policy is configured.
        cart.add_product(boot).await?;

        let current = cart.cart().await?;
        for item in current.items() {
            info!(product_id = %item.id, title = %item.title, amount = item.amount, "Cart line");
        }
        info!(units = current.item_count(), subtotal = current.subtotal(), "Cart totals");

        cart.remove_product(boot).await?;
        Ok::<_, SystemError>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
