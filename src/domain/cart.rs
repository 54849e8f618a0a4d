use rust_decimal::Decimal;
use serde::Serialize;

use super::ProductId;

/// A product selection waiting for checkout. `quantity` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A cart entry enriched with catalog details for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Snapshot of the cart as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total_items: u64,
    pub total_price: Decimal,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product_id == product_id)
    }
}

/// What an update did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Updated(u32),
    Removed,
}
