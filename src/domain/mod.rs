pub mod product;
pub mod cart;
pub mod order;

pub use product::*;
pub use cart::*;
pub use order::*;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a money amount to cents, midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
