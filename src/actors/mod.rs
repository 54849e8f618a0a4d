use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::ShopClient;
use crate::domain::{CartChange, CartView, Order, Product, ProductId};
use crate::error::ShopError;
use crate::messages::{CartUpdate, ServiceResponse, ShopRequest};
use crate::shop::ShopState;

/// Macro for clean error response handling
macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

/// The one task that owns the catalog and cart.
///
/// Requests are handled strictly one at a time, so no caller ever sees a checkout that has
/// withdrawn some stock but not the rest.
pub struct ShopService {
    receiver: mpsc::Receiver<ShopRequest>,
    state: ShopState,
}

impl ShopService {
    pub fn new(buffer_size: usize, state: ShopState) -> (Self, ShopClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, state };
        let client = ShopClient::new(sender);
        (service, client)
    }

    #[instrument(name = "shop_service", skip(self))]
    pub async fn run(mut self) {
        info!(products = self.state.catalog().len(), "ShopService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ShopRequest::ListProducts { respond_to } => {
                    self.handle_list_products(respond_to);
                }
                ShopRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                ShopRequest::AddItem {
                    product_id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_add_item(product_id, quantity, respond_to);
                }
                ShopRequest::UpdateItem {
                    product_id,
                    quantity,
                    respond_to,
                } => {
                    self.handle_update_item(product_id, quantity, respond_to);
                }
                ShopRequest::ViewCart { respond_to } => {
                    self.handle_view_cart(respond_to);
                }
                ShopRequest::ClearCart { respond_to } => {
                    self.handle_clear_cart(respond_to);
                }
                ShopRequest::Checkout { respond_to } => {
                    self.handle_checkout(respond_to);
                }
                ShopRequest::Shutdown => {
                    info!("ShopService shutting down");
                    break;
                }
                #[cfg(test)]
                ShopRequest::CartEntryCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.cart().entries().len()));
                }
            }
        }

        info!("ShopService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_products(&self, respond_to: ServiceResponse<Vec<Product>, ShopError>) {
        debug!("Processing list_products request");

        let products = self.state.list_products();
        info!(product_count = products.len(), "Listed products");

        let _ = respond_to.send(Ok(products));
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(&self, id: ProductId, respond_to: ServiceResponse<Product, ShopError>) {
        debug!("Processing get_product request");

        let result = self.state.get_product(id);
        match &result {
            Ok(product) => debug!(product_name = %product.name, stock = product.stock, "Product found"),
            Err(_) => debug!("Product not found"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %product_id, quantity = %quantity), skip(self, respond_to))]
    fn handle_add_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartUpdate<u32>, ShopError>,
    ) {
        debug!("Processing add_item request");

        let in_cart = match self.state.add_item(product_id, quantity) {
            Ok(in_cart) => in_cart,
            Err(e) => {
                warn!(error = %e, "Add to cart rejected");
                send_error!(respond_to, e);
            }
        };
        info!(in_cart, "Item added to cart");

        let result = self.cart_update(product_id, in_cart);
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %product_id, quantity = %quantity), skip(self, respond_to))]
    fn handle_update_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartUpdate<CartChange>, ShopError>,
    ) {
        debug!("Processing update_item request");

        let change = match self.state.update_item(product_id, quantity) {
            Ok(change) => change,
            Err(e) => {
                warn!(error = %e, "Cart update rejected");
                send_error!(respond_to, e);
            }
        };
        info!(?change, "Cart item updated");

        let result = self.cart_update(product_id, change);
        let _ = respond_to.send(result);
    }

    fn cart_update<C>(&self, product_id: ProductId, change: C) -> Result<CartUpdate<C>, ShopError> {
        let product_name = self.state.get_product(product_id)?.name;
        let cart = self.state.view_cart()?;
        Ok(CartUpdate {
            change,
            product_name,
            cart,
        })
    }

    #[instrument(skip(self, respond_to))]
    fn handle_view_cart(&self, respond_to: ServiceResponse<CartView, ShopError>) {
        debug!("Processing view_cart request");

        let result = self.state.view_cart();
        if let Ok(cart) = &result {
            debug!(lines = cart.items.len(), total = %cart.total_price, "Cart viewed");
        }

        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear_cart(&mut self, respond_to: ServiceResponse<(), ShopError>) {
        debug!("Processing clear_cart request");

        self.state.clear_cart();
        info!("Cart cleared");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_checkout(&mut self, respond_to: ServiceResponse<Order, ShopError>) {
        info!(lines = self.state.cart().entries().len(), "Processing checkout request");

        let result = self.state.checkout();
        match &result {
            Ok(order) => info!(
                total_items = order.total_items,
                total = %order.total,
                "Order placed successfully"
            ),
            Err(e) => warn!(error = %e, "Checkout failed"),
        }

        let _ = respond_to.send(result);
    }
}
