//! Thin handles over actor channels.

#[macro_use]
mod macros;

mod catalog_client;
mod cart_client;

pub use catalog_client::CatalogClient;
pub use cart_client::CartClient;
