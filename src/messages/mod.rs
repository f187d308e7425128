use tokio::sync::oneshot;
use crate::cart_actor::CartError;
use crate::domain::{Cart, ProductId, UpdateProductAmount};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Commands accepted by the cart service. Each variant carries its
/// parameters and a oneshot channel for the completion signal.
#[derive(Debug)]
pub enum CartRequest {
    GetCart {
        respond_to: ServiceResponse<Cart, CartError>,
    },
    AddProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<(), CartError>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<(), CartError>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: ServiceResponse<(), CartError>,
    },
    Shutdown,
}
