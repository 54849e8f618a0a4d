use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::error;

use crate::domain::{seed_catalog, Product, ProductId};
use crate::error::ShopError;

/// The purchasable products and their stock levels, in insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: seed_catalog(),
        }
    }
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and negative prices.
    pub fn new(products: Vec<Product>) -> Result<Self, ShopError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(ShopError::InvalidInput(format!(
                    "Duplicate product ID {}",
                    product.id
                )));
            }
            if product.price < Decimal::ZERO {
                return Err(ShopError::InvalidInput(format!(
                    "Product {} has a negative price",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    pub fn get_product(&self, id: ProductId) -> Result<&Product, ShopError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or(ShopError::ProductNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Removes `quantity` units from a product's stock.
    ///
    /// Checkout validates every entry before calling this, so running short here is a bug in
    /// the caller and is reported rather than clamped.
    pub(crate) fn withdraw_stock(&mut self, id: ProductId, quantity: u32) -> Result<u32, ShopError> {
        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(ShopError::ProductNotFound(id))?;
        let available = product.stock;
        match available.checked_sub(quantity) {
            Some(remaining) => {
                product.stock = remaining;
                Ok(remaining)
            }
            None => {
                error!(product_id = id, quantity, available, "Stock withdrawal exceeds stock");
                Err(ShopError::Internal(format!(
                    "Cannot withdraw {} units of product {} with {} in stock",
                    quantity, id, available
                )))
            }
        }
    }
}
