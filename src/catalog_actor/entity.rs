use crate::actor_framework::Entity;
use crate::domain::{Product, ProductId};
use super::dtos::{ProductCreate, ProductPatch};
use super::actions::{CatalogAction, CatalogActionResult};

/// A product record together with the stock the catalog holds for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub product: Product,
    pub stock: u32,
}

impl Entity for CatalogEntry {
    type Id = ProductId;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;

    /// Creates a catalog entry from creation parameters.
    ///
    /// # Errors
    /// Rejects negative or non-finite prices.
    fn from_create(id: ProductId, payload: ProductCreate) -> Result<Self, String> {
        if !payload.price.is_finite() || payload.price < 0.0 {
            return Err(format!("Invalid price: {}", payload.price));
        }
        Ok(Self {
            product: Product::new(id, payload.title, payload.price, payload.image),
            stock: payload.stock,
        })
    }

    /// Updates price and/or stock level.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            if !price.is_finite() || price < 0.0 {
                return Err(format!("Invalid price: {}", price));
            }
            self.product.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CatalogAction) -> Result<CatalogActionResult, String> {
        match action {
            CatalogAction::CheckStock => Ok(CatalogActionResult::StockLevel(self.stock)),
        }
    }
}
