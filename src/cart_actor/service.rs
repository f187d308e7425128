use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::Catalog;
use crate::clients::CartClient;
use crate::config::{CartConfig, StockPolicy};
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::messages::{CartRequest, ServiceResponse};
use crate::notify::{Notice, Notifier};
use crate::storage::{load_cart, save_cart, CartStore, Restored};
use super::CartError;

pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
pub const ADD_FAILED: &str = "Failed to add product";
pub const REMOVE_FAILED: &str = "Failed to remove product";
pub const UPDATE_FAILED: &str = "Failed to update product quantity";
pub const RESTORE_FAILED: &str = "Saved cart could not be restored";

/// Cart actor. Sole owner of the cart; requests are handled one at a time,
/// catalog round-trips included, so concurrent callers cannot overwrite each
/// other's changes.
///
/// Every mutation builds a new cart, writes it to the store, and only then
/// swaps it in, so the stored snapshot always equals the in-memory cart.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    published: watch::Sender<Cart>,
    catalog: Arc<dyn Catalog>,
    store: Arc<dyn CartStore>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    add_stock_policy: StockPolicy,
}

impl CartService {
    /// Restores the saved cart from `store` and returns the service with its client.
    #[instrument(name = "cart_service_init", skip_all, fields(storage_key = %config.storage_key))]
    pub fn new(
        config: &CartConfig,
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn CartStore>,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, CartClient) {
        let cart = restore(store.as_ref(), &config.storage_key, notifier.as_ref());
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        let (published, subscriber) = watch::channel(cart.clone());

        let service = Self {
            receiver,
            cart,
            published,
            catalog,
            store,
            notifier,
            storage_key: config.storage_key.clone(),
            add_stock_policy: config.add_stock_policy,
        };
        (service, CartClient::new(sender, subscriber))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(lines = self.cart.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.clone()));
                }
                CartRequest::AddProduct { product_id, respond_to } => {
                    self.handle_add_product(product_id, respond_to).await;
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    self.handle_remove_product(product_id, respond_to);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    self.handle_update_product_amount(update, respond_to).await;
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_add_product(&mut self, product_id: ProductId, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing add_product request");
        if let Err(e) = self.add_product(product_id).await {
            self.report(ADD_FAILED, e);
        }
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    fn handle_remove_product(&mut self, product_id: ProductId, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing remove_product request");
        if let Err(e) = self.remove_product(product_id) {
            self.report(REMOVE_FAILED, e);
        }
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(product_id = %update.product_id, amount = update.amount), skip(self, update, respond_to))]
    async fn handle_update_product_amount(
        &mut self,
        update: UpdateProductAmount,
        respond_to: ServiceResponse<(), CartError>,
    ) {
        debug!("Processing update_product_amount request");
        if let Err(e) = self.update_product_amount(update).await {
            self.report(UPDATE_FAILED, e);
        }
        let _ = respond_to.send(Ok(()));
    }

    async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let (product, stock) = tokio::try_join!(
            self.catalog.product(product_id),
            self.catalog.stock(product_id)
        )?;

        if stock.is_exhausted() {
            let held = self.cart.get(product_id).map_or(0, |item| u64::from(item.amount));
            let exhausted = CartError::StockExhausted {
                product_id,
                requested: held + 1,
                available: stock.amount,
            };
            match self.add_stock_policy {
                StockPolicy::Abort => return Err(exhausted),
                StockPolicy::WarnOnly => {
                    warn!("Stock exhausted, adding anyway");
                    self.notifier.notify(Notice::warning(OUT_OF_STOCK, exhausted));
                }
            }
        }

        let next = self.cart.with_added(product);
        self.commit(next)?;

        let amount = self.cart.get(product_id).map_or(0, |item| item.amount);
        info!(amount, "Product added");
        Ok(())
    }

    fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let next = self.cart.without(product_id);
        if next.len() == self.cart.len() {
            debug!("Product not in cart");
            return Ok(());
        }

        self.commit(next)?;
        info!("Product removed");
        Ok(())
    }

    async fn update_product_amount(&mut self, update: UpdateProductAmount) -> Result<(), CartError> {
        if update.amount <= 0 {
            debug!("Non-positive amount ignored");
            return Ok(());
        }

        let stock = self.catalog.stock(update.product_id).await?;
        let amount = match u32::try_from(update.amount) {
            Ok(amount) if amount <= stock.amount => amount,
            _ => {
                return Err(CartError::StockExhausted {
                    product_id: update.product_id,
                    requested: update.amount.unsigned_abs(),
                    available: stock.amount,
                })
            }
        };

        let next = self.cart.with_amount(update.product_id, amount);
        if next == self.cart {
            debug!("Cart unchanged");
            return Ok(());
        }

        self.commit(next)?;
        info!("Product amount updated");
        Ok(())
    }

    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        save_cart(self.store.as_ref(), &self.storage_key, &next)?;
        self.cart = next;
        self.published.send_replace(self.cart.clone());
        Ok(())
    }

    /// Turns a failed operation into exactly one notice.
    fn report(&self, failure: &'static str, error: CartError) {
        let notice = if matches!(error, CartError::StockExhausted { .. }) {
            warn!(error = %error, "Operation aborted");
            Notice::warning(OUT_OF_STOCK, error)
        } else {
            error!(error = %error, "{}", failure);
            Notice::error(failure, error)
        };
        self.notifier.notify(notice);
    }
}

fn restore(store: &dyn CartStore, key: &str, notifier: &dyn Notifier) -> Cart {
    match load_cart(store, key) {
        Restored::Missing => {
            debug!("No saved cart, starting empty");
            Cart::new()
        }
        Restored::Loaded(cart) => {
            info!(lines = cart.len(), "Saved cart restored");
            cart
        }
        Restored::Unreadable(reason) => {
            warn!(%reason, "Saved cart unreadable, starting empty");
            notifier.notify(Notice::warning(RESTORE_FAILED, CartError::CorruptSnapshot(reason)));
            Cart::new()
        }
    }
}
