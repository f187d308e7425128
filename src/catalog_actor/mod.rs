//! In-process catalog: product records and their stock levels served by a ResourceActor.

mod actions;
mod dtos;
pub mod entity;

pub use actions::*;
pub use dtos::*;
pub use entity::CatalogEntry;

use crate::actor_framework::ResourceActor;
use crate::clients::CatalogClient;
use crate::domain::ProductId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new catalog actor and its client. Product ids are handed out from 1.
pub fn new(buffer_size: usize) -> (ResourceActor<CatalogEntry>, CatalogClient) {
    let product_id_counter = Arc::new(AtomicU64::new(1));
    let next_product_id = move || ProductId::new(product_id_counter.fetch_add(1, Ordering::SeqCst));

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_product_id);
    let client = CatalogClient::new(generic_client);

    (actor, client)
}
