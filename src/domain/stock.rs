use serde::{Deserialize, Serialize};

use super::ProductId;

/// Available quantity for a product, as reported by the catalog at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    pub fn new(id: impl Into<ProductId>, amount: u32) -> Self {
        Self { id: id.into(), amount }
    }

    pub fn is_exhausted(&self) -> bool {
        self.amount == 0
    }
}
