use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = u32;

/// Represents a product in the catalog.
///
/// `stock` is the only field that changes after startup, and only checkout changes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }
}

/// Products available when no catalog is configured, in display order.
pub fn seed_catalog() -> Vec<Product> {
    vec![
        Product::new(101, "Laptop Charger", Decimal::new(7500, 2), 5),
        Product::new(102, "Wireless Mouse", Decimal::new(2500, 2), 10),
        Product::new(103, "USB-C Hub", Decimal::new(4000, 2), 2),
        Product::new(104, "Monitor Stand", Decimal::new(5000, 2), 15),
    ]
}
