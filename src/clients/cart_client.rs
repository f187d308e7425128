use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};
use crate::cart_actor::CartError;
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::messages::CartRequest;

/// Handle to the cart service.
///
/// Mutations resolve once the service has finished the operation. Failures
/// of the operation itself are reported through the notifier, not here; an
/// `Err` only means the service is gone.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    published: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, published: watch::Receiver<Cart>) -> Self {
        Self { sender, published }
    }

    /// Latest committed cart, without queueing behind pending mutations.
    #[allow(dead_code)]
    pub fn current(&self) -> Cart {
        self.published.borrow().clone()
    }

    /// Receiver that is notified after every committed mutation.
    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.published.clone()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CartClient => fn cart() -> Cart as CartRequest::GetCart, Error = CartError);
client_method!(CartClient => fn add_product(product_id: ProductId) -> () as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => fn remove_product(product_id: ProductId) -> () as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => fn update_product_amount(update: UpdateProductAmount) -> () as CartRequest::UpdateProductAmount, Error = CartError);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::create_mock_cart_client;

    #[tokio::test]
    async fn test_update_sends_request_and_awaits_completion() {
        let (client, mut receiver, _publisher) = create_mock_cart_client(4);

        let task = tokio::spawn(async move {
            client.update_product_amount(UpdateProductAmount::new(3, 2)).await
        });

        match receiver.recv().await {
            Some(CartRequest::UpdateProductAmount { update, respond_to }) => {
                assert_eq!(update, UpdateProductAmount::new(3, 2));
                respond_to.send(Ok(())).unwrap();
            }
            other => panic!("Unexpected request: {:?}", other),
        }

        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_communication_error() {
        let (client, mut receiver, _publisher) = create_mock_cart_client(4);

        let task = tokio::spawn(async move { client.add_product(ProductId::new(1)).await });

        match receiver.recv().await {
            Some(CartRequest::AddProduct { respond_to, .. }) => drop(respond_to),
            other => panic!("Unexpected request: {:?}", other),
        }

        assert_eq!(
            task.await.unwrap(),
            Err(CartError::ActorCommunicationError("Actor dropped".to_string()))
        );
    }

    #[tokio::test]
    async fn test_current_follows_published_cart() {
        let (client, _receiver, publisher) = create_mock_cart_client(4);
        assert!(client.current().is_empty());

        let cart = Cart::new().with_added(crate::domain::Product::new(1, "Shoe", 50.0, "shoe.jpg"));
        publisher.send(cart.clone()).unwrap();

        assert_eq!(client.current(), cart);
    }
}
