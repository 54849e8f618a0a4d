use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{round_money, Order, OrderLine};
use crate::error::{ShopError, StockShortfall};
use crate::shop::{add_amount, line_subtotal, Cart, Catalog};

/// Turns the cart into stock deductions and an order summary.
///
/// All-or-nothing: every entry is checked against current stock first, and on any shortfall
/// neither the catalog nor the cart is touched.
pub fn process_checkout(catalog: &mut Catalog, cart: &mut Cart) -> Result<Order, ShopError> {
    if cart.is_empty() {
        return Err(ShopError::EmptyCart);
    }

    // Phase 1: validate every entry
    let mut shortfalls = Vec::new();
    for entry in cart.entries() {
        let product = catalog.get_product(entry.product_id)?;
        if entry.quantity > product.stock {
            shortfalls.push(StockShortfall {
                product_id: product.id,
                name: product.name.clone(),
                requested: entry.quantity,
                available: product.stock,
            });
        }
    }
    if !shortfalls.is_empty() {
        warn!(offending = shortfalls.len(), "Checkout rejected, insufficient stock");
        return Err(ShopError::InsufficientStock(shortfalls));
    }

    // Phase 2: price the order, then commit
    let mut items = Vec::with_capacity(cart.entries().len());
    let mut total_items = 0u64;
    let mut total = Decimal::ZERO;
    for entry in cart.entries() {
        let product = catalog.get_product(entry.product_id)?;
        let subtotal = line_subtotal(product.price, entry.quantity)?;
        total_items += u64::from(entry.quantity);
        total = add_amount(total, subtotal)?;
        items.push(OrderLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: entry.quantity,
            subtotal: round_money(subtotal),
        });
    }

    for line in &items {
        let remaining = catalog.withdraw_stock(line.product_id, line.quantity)?;
        debug!(product_id = line.product_id, remaining, "Stock withdrawn");
    }
    cart.clear();

    Ok(Order {
        items,
        total_items,
        total: round_money(total),
    })
}
