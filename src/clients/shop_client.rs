use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{CartChange, CartView, Order, Product, ProductId};
use crate::error::ShopError;
use crate::messages::{CartUpdate, ShopRequest};

/// Cloneable handle to the shop service. Every method is one request/reply round trip.
#[derive(Clone)]
pub struct ShopClient {
    sender: mpsc::Sender<ShopRequest>,
}

impl ShopClient {
    pub fn new(sender: mpsc::Sender<ShopRequest>) -> Self {
        Self { sender }
    }

    /// Asks the service to stop after the requests already queued ahead of this one.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ShopError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ShopRequest::Shutdown)
            .await
            .map_err(|_| ShopError::ActorCommunicationError("Service closed".to_string()))
    }
}

client_method!(ShopClient => fn list_products() -> Vec<Product> as ShopRequest::ListProducts);
client_method!(ShopClient => fn get_product(id: ProductId) -> Product as ShopRequest::GetProduct);
client_method!(ShopClient => fn add_item(product_id: ProductId, quantity: i64) -> CartUpdate<u32> as ShopRequest::AddItem);
client_method!(ShopClient => fn update_item(product_id: ProductId, quantity: i64) -> CartUpdate<CartChange> as ShopRequest::UpdateItem);
client_method!(ShopClient => fn view_cart() -> CartView as ShopRequest::ViewCart);
client_method!(ShopClient => fn clear_cart() -> () as ShopRequest::ClearCart);
client_method!(ShopClient => fn checkout() -> Order as ShopRequest::Checkout);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(ShopClient => fn cart_entry_count() -> usize as ShopRequest::CartEntryCount);
