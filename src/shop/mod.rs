//! Catalog, cart and checkout over one explicitly owned [`ShopState`].

mod cart;
mod catalog;
mod checkout;

pub use cart::Cart;
pub use catalog::Catalog;
pub use checkout::process_checkout;

use rust_decimal::Decimal;

use crate::domain::{CartChange, CartView, Order, Product, ProductId};
use crate::error::ShopError;

/// `price × quantity`, rejected when it leaves `Decimal`'s range.
pub(crate) fn line_subtotal(price: Decimal, quantity: u32) -> Result<Decimal, ShopError> {
    price.checked_mul(Decimal::from(quantity)).ok_or_else(amount_too_large)
}

pub(crate) fn add_amount(total: Decimal, amount: Decimal) -> Result<Decimal, ShopError> {
    total.checked_add(amount).ok_or_else(amount_too_large)
}

fn amount_too_large() -> ShopError {
    ShopError::InvalidInput("Cart total is too large".to_string())
}

/// Everything the shop mutates. Owned by exactly one service task at runtime.
#[derive(Debug, Clone, Default)]
pub struct ShopState {
    catalog: Catalog,
    cart: Cart,
}

impl ShopState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn list_products(&self) -> Vec<Product> {
        self.catalog.list_products().to_vec()
    }

    pub fn get_product(&self, id: ProductId) -> Result<Product, ShopError> {
        self.catalog.get_product(id).cloned()
    }

    pub fn add_item(&mut self, product_id: ProductId, quantity: i64) -> Result<u32, ShopError> {
        self.cart.add_item(&self.catalog, product_id, quantity)
    }

    pub fn update_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartChange, ShopError> {
        self.cart.update_item(&self.catalog, product_id, quantity)
    }

    pub fn view_cart(&self) -> Result<CartView, ShopError> {
        self.cart.view(&self.catalog)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn checkout(&mut self) -> Result<Order, ShopError> {
        process_checkout(&mut self.catalog, &mut self.cart)
    }
}
