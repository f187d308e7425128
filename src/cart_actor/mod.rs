//! The cart manager: an actor that owns the cart and applies mutations one at a time.

pub mod error;
mod service;

pub use error::*;
pub use service::*;
