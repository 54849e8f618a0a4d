use tokio::sync::oneshot;

use crate::domain::{CartChange, CartView, Order, Product, ProductId};
use crate::error::ShopError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Cart state after a successful add or update, plus what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate<C> {
    pub change: C,
    pub product_name: String,
    pub cart: CartView,
}

/// Typed requests for the shop service. Each variant carries its parameters and a oneshot
/// channel for the reply.
#[derive(Debug)]
pub enum ShopRequest {
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, ShopError>,
    },
    GetProduct {
        id: ProductId,
        respond_to: ServiceResponse<Product, ShopError>,
    },
    AddItem {
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartUpdate<u32>, ShopError>,
    },
    UpdateItem {
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartUpdate<CartChange>, ShopError>,
    },
    ViewCart {
        respond_to: ServiceResponse<CartView, ShopError>,
    },
    ClearCart {
        respond_to: ServiceResponse<(), ShopError>,
    },
    Checkout {
        respond_to: ServiceResponse<Order, ShopError>,
    },
    Shutdown,
    #[cfg(test)]
    CartEntryCount {
        respond_to: ServiceResponse<usize, ShopError>,
    },
}
