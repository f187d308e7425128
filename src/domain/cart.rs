use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CartItem, Product, ProductId};

/// Raised when a list of lines holds the same product twice.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Duplicate cart line for product {0}")]
pub struct DuplicateLine(pub ProductId);

/// Ordered collection of cart lines, unique by product id.
///
/// All mutators return a new cart and leave `self` untouched, so a half-built
/// cart is never observable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

/// Request to set the quantity of one cart line.
///
/// The amount is signed: non-positive requests are representable and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
        }
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// One more unit of `product`: increments its line, or appends a new line with amount 1.
    pub fn with_added(&self, product: Product) -> Self {
        if self.contains(product.id) {
            let items = self
                .items
                .iter()
                .map(|item| {
                    let mut item = item.clone();
                    if item.id == product.id {
                        item.amount = item.amount.saturating_add(1);
                    }
                    item
                })
                .collect();
            Self { items }
        } else {
            let mut items = self.items.clone();
            items.push(CartItem::from_product(product, 1));
            Self { items }
        }
    }

    pub fn without(&self, id: ProductId) -> Self {
        let items = self.items.iter().filter(|item| item.id != id).cloned().collect();
        Self { items }
    }

    /// Sets the amount of the matching line; every other line passes through unmodified.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if item.id == id {
                    item.amount = amount;
                }
                item
            })
            .collect();
        Self { items }
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = DuplicateLine;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        for (index, item) in items.iter().enumerate() {
            if items.iter().skip(index + 1).any(|other| other.id == item.id) {
                return Err(DuplicateLine(item.id));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
