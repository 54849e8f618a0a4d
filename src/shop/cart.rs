use rust_decimal::Decimal;

use crate::domain::{round_money, CartChange, CartEntry, CartLine, CartView, ProductId};
use crate::error::ShopError;
use crate::shop::{add_amount, line_subtotal, Catalog};

/// The pending product selection. Entries keep first-add order and product ids are unique.
///
/// Stock is deliberately not consulted here; it is only checked at checkout.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.product_id == product_id)
            .map(|entry| entry.quantity)
    }

    /// Adds `quantity` units, merging into an existing entry for the same product.
    /// Returns the entry's new quantity.
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<u32, ShopError> {
        if quantity <= 0 {
            return Err(ShopError::InvalidInput(
                "Quantity must be greater than 0".to_string(),
            ));
        }
        catalog.get_product(product_id)?;
        let quantity = to_quantity(quantity)?;
        let new_quantity = match self.quantity_of(product_id) {
            Some(current) => current.checked_add(quantity).ok_or_else(|| {
                ShopError::InvalidInput("Cart quantity is too large".to_string())
            })?,
            None => quantity,
        };
        self.check_total_with(catalog, product_id, new_quantity)?;

        match self.entries.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => entry.quantity = new_quantity,
            None => self.entries.push(CartEntry { product_id, quantity: new_quantity }),
        }
        Ok(new_quantity)
    }

    /// Replaces the quantity of an entry already in the cart; zero removes it.
    pub fn update_item(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartChange, ShopError> {
        if quantity < 0 {
            return Err(ShopError::InvalidInput(
                "Quantity cannot be negative".to_string(),
            ));
        }
        catalog.get_product(product_id)?;
        let position = self
            .entries
            .iter()
            .position(|e| e.product_id == product_id)
            .ok_or(ShopError::NotInCart(product_id))?;

        if quantity == 0 {
            self.entries.remove(position);
            return Ok(CartChange::Removed);
        }
        let quantity = to_quantity(quantity)?;
        self.check_total_with(catalog, product_id, quantity)?;
        self.entries[position].quantity = quantity;
        Ok(CartChange::Updated(quantity))
    }

    pub fn view(&self, catalog: &Catalog) -> Result<CartView, ShopError> {
        let mut items = Vec::with_capacity(self.entries.len());
        let mut total_items = 0u64;
        let mut total_price = Decimal::ZERO;

        for entry in &self.entries {
            let product = catalog.get_product(entry.product_id)?;
            let subtotal = line_subtotal(product.price, entry.quantity)?;
            total_items += u64::from(entry.quantity);
            total_price = add_amount(total_price, subtotal)?;
            items.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: entry.quantity,
                subtotal: round_money(subtotal),
            });
        }

        Ok(CartView {
            items,
            total_items,
            total_price: round_money(total_price),
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Fails when the cart, with `product_id` set to `quantity`, could not be priced.
    /// Prices are non-negative, so a representable total implies representable partial sums.
    fn check_total_with(
        &self,
        catalog: &Catalog,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), ShopError> {
        let others = self
            .entries
            .iter()
            .filter(|e| e.product_id != product_id)
            .map(|e| (e.product_id, e.quantity));

        let mut total = Decimal::ZERO;
        for (id, quantity) in others.chain(std::iter::once((product_id, quantity))) {
            let price = catalog.get_product(id)?.price;
            total = add_amount(total, line_subtotal(price, quantity)?)?;
        }
        Ok(())
    }
}

fn to_quantity(quantity: i64) -> Result<u32, ShopError> {
    u32::try_from(quantity)
        .map_err(|_| ShopError::InvalidInput(format!("Quantity {} is too large", quantity)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;

    #[test]
    fn adding_twice_accumulates_quantity() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();

        assert_eq!(cart.add_item(&catalog, 102, 3), Ok(3));
        assert_eq!(cart.add_item(&catalog, 102, 3), Ok(6));
        assert_eq!(cart.entries(), &[CartEntry { product_id: 102, quantity: 6 }]);
    }

    #[test]
    fn add_does_not_check_stock() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();

        // USB-C Hub has 2 in stock
        assert_eq!(cart.add_item(&catalog, 103, 50), Ok(50));
    }

    #[test]
    fn add_rejects_bad_input() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();

        assert!(matches!(cart.add_item(&catalog, 101, 0), Err(ShopError::InvalidInput(_))));
        assert!(matches!(cart.add_item(&catalog, 101, -2), Err(ShopError::InvalidInput(_))));
        assert_eq!(cart.add_item(&catalog, 999, 1), Err(ShopError::ProductNotFound(999)));
        assert!(matches!(
            cart.add_item(&catalog, 101, i64::from(u32::MAX) + 1),
            Err(ShopError::InvalidInput(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn update_to_zero_removes_entry() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 101, 1).unwrap();
        cart.add_item(&catalog, 104, 2).unwrap();

        assert_eq!(cart.update_item(&catalog, 101, 0), Ok(CartChange::Removed));
        let view = cart.view(&catalog).unwrap();
        assert!(view.line(101).is_none());
        assert_eq!(view.items.len(), 1);
    }

    #[test]
    fn update_replaces_quantity() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 101, 4).unwrap();

        assert_eq!(cart.update_item(&catalog, 101, 1), Ok(CartChange::Updated(1)));
        assert_eq!(cart.quantity_of(101), Some(1));
    }

    #[test]
    fn update_requires_entry_in_cart() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();

        assert_eq!(cart.update_item(&catalog, 101, 1), Err(ShopError::NotInCart(101)));
        assert_eq!(cart.update_item(&catalog, 999, 1), Err(ShopError::ProductNotFound(999)));
        cart.add_item(&catalog, 101, 1).unwrap();
        assert!(matches!(cart.update_item(&catalog, 101, -1), Err(ShopError::InvalidInput(_))));
        assert_eq!(cart.quantity_of(101), Some(1));
    }

    #[test]
    fn view_keeps_first_add_order_and_totals() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 104, 1).unwrap();
        cart.add_item(&catalog, 101, 2).unwrap();
        cart.add_item(&catalog, 104, 1).unwrap();

        let view = cart.view(&catalog).unwrap();
        let ids: Vec<ProductId> = view.items.iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![104, 101]);
        assert_eq!(view.line(104).unwrap().subtotal, Decimal::new(10000, 2));
        assert_eq!(view.total_items, 4);
        assert_eq!(view.total_price, Decimal::new(25000, 2));
    }

    #[test]
    fn unpriceable_totals_are_rejected_without_changing_the_cart() {
        let catalog = Catalog::new(vec![
            Product::new(1, "Gold", Decimal::MAX, 5),
            Product::new(2, "Pin", Decimal::ONE, 5),
        ])
        .unwrap();
        let mut cart = Cart::new();

        assert_eq!(cart.add_item(&catalog, 1, 1), Ok(1));
        assert!(matches!(cart.add_item(&catalog, 1, 1), Err(ShopError::InvalidInput(_))));
        assert!(matches!(cart.add_item(&catalog, 2, 1), Err(ShopError::InvalidInput(_))));
        assert!(matches!(cart.update_item(&catalog, 1, 2), Err(ShopError::InvalidInput(_))));

        assert_eq!(cart.entries(), &[CartEntry { product_id: 1, quantity: 1 }]);
        assert_eq!(cart.view(&catalog).unwrap().total_price, Decimal::MAX);
    }

    #[test]
    fn clear_is_idempotent() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add_item(&catalog, 101, 1).unwrap();

        cart.clear();
        cart.clear();
        assert!(cart.view(&catalog).unwrap().is_empty());
    }
}
