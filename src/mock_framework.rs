//! # Mock Framework
//!
//! Utilities for testing clients and the cart service in isolation.
//!
//! Use [`create_mock_client`] to get a resource client and a receiver, then
//! helpers like [`expect_get`] or [`expect_action`] to assert what it sends.
//! [`spawn_cart`] runs a real `CartService` against a [`ScriptedCatalog`],
//! a [`FlakyStore`] and a [`RecordingNotifier`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::cart_actor::CartService;
use crate::catalog::{Catalog, CatalogError};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::domain::{Cart, Product, ProductId, Stock};
use crate::messages::CartRequest;
use crate::notify::{Notice, Notifier};
use crate::storage::{CartStore, MemoryStore, StoreError};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends into a channel the test controls, so the test can play
/// the actor: inspect each request and answer with success, failure or
/// nothing at all.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Same idea for the cart: a client, the request receiver, and the sender
/// behind `CartClient::current`.
pub fn create_mock_cart_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>, watch::Sender<Cart>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (publisher, subscriber) = watch::channel(Cart::new());
    (CartClient::new(sender, subscriber), receiver, publisher)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// In-memory catalog whose answers and availability the test scripts.
#[derive(Default)]
pub struct ScriptedCatalog {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, u32>>,
    offline: AtomicBool,
    product_calls: AtomicUsize,
    stock_calls: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, id: u64, stock: u32) -> Self {
        let product = Product::new(id, format!("Product {id}"), 10.0 * id as f64, format!("product-{id}.jpg"));
        self.products.lock().unwrap().insert(product.id, product);
        self.stock.lock().unwrap().insert(ProductId::new(id), stock);
        self
    }

    pub fn set_stock(&self, id: u64, amount: u32) {
        self.stock.lock().unwrap().insert(ProductId::new(id), amount);
    }

    /// While offline every lookup fails as if the network were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(CatalogError::ActorCommunicationError("catalog offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.products.lock().unwrap().get(&id).cloned().ok_or(CatalogError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let amount = self.stock.lock().unwrap().get(&id).copied().ok_or(CatalogError::NotFound(id))?;
        Ok(Stock::new(id, amount))
    }
}

/// Memory store whose reads and writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl CartStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Io("storage locked".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.set(key, blob)
    }
}

/// Notifier that keeps every notice for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// A running cart service plus handles on all of its collaborators.
pub struct CartHarness {
    pub client: CartClient,
    pub catalog: Arc<ScriptedCatalog>,
    pub store: Arc<FlakyStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub handle: JoinHandle<()>,
    storage_key: String,
}

impl CartHarness {
    /// Raw snapshot currently in the store.
    pub fn snapshot(&self) -> Option<String> {
        self.store.get(&self.storage_key).unwrap()
    }

    pub fn saved_cart(&self) -> Option<Cart> {
        self.snapshot().map(|blob| serde_json::from_str(&blob).unwrap())
    }
}

pub fn spawn_cart(config: CartConfig, catalog: ScriptedCatalog, store: FlakyStore) -> CartHarness {
    let catalog = Arc::new(catalog);
    let store = Arc::new(store);
    let notifier = Arc::new(RecordingNotifier::default());

    let (service, client) = CartService::new(&config, catalog.clone(), store.clone(), notifier.clone());
    let handle = tokio::spawn(service.run());

    CartHarness {
        client,
        catalog,
        store,
        notifier,
        handle,
        storage_key: config.storage_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<crate::catalog_actor::CatalogEntry>(10);

        let get_task = tokio::spawn(async move { client.get(ProductId::new(1)).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, ProductId::new(1));
        responder.send(Ok(None)).unwrap();

        assert_eq!(get_task.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn test_scripted_catalog_counts_and_goes_offline() {
        let catalog = ScriptedCatalog::new().with_product(2, 4);
        assert_eq!(catalog.product(ProductId::new(2)).await.unwrap().price, 20.0);
        catalog.set_stock(2, 1);
        assert_eq!(catalog.stock(ProductId::new(2)).await.unwrap().amount, 1);

        catalog.set_offline(true);
        assert!(catalog.stock(ProductId::new(2)).await.is_err());
        assert_eq!(catalog.product_calls(), 1);
        assert_eq!(catalog.stock_calls(), 2);
    }
}
