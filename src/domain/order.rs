use rust_decimal::Decimal;
use serde::Serialize;

use super::ProductId;

/// One purchased product, priced at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Summary of a completed checkout. Returned to the caller and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub items: Vec<OrderLine>,
    pub total_items: u64,
    pub total: Decimal,
}
