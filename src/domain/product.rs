use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric catalog identifier shared by products, stock records and cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[allow(dead_code)]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Represents a product as the catalog describes it.
///
/// Catalog attributes this crate does not interpret are kept in `extra`
/// so that they survive a trip through the cart snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
            extra: Map::new(),
        }
    }
}

/// A product once it sits in the cart: the catalog shape plus the quantity held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub amount: u32,
}

impl CartItem {
    /// Builds a cart line from a catalog record. A catalog `amount` attribute is
    /// dropped: the line's own quantity owns that key in the snapshot.
    pub fn from_product(product: Product, amount: u32) -> Self {
        let mut extra = product.extra;
        extra.remove("amount");
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            extra,
            amount,
        }
    }

    /// Price of the whole line.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}
