use serde::Serialize;
use thiserror::Error;

use crate::domain::ProductId;

/// Coarse classification of a [`ShopError`], as seen by callers at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    EmptyCart,
    InsufficientStock,
    Unavailable,
    Internal,
}

impl ErrorKind {
    /// HTTP-equivalent status code for this kind of failure.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidInput => 400,
            ErrorKind::EmptyCart | ErrorKind::InsufficientStock => 409,
            ErrorKind::Unavailable => 503,
            ErrorKind::Internal => 500,
        }
    }
}

/// One cart entry that cannot be fulfilled from current stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockShortfall {
    pub product_id: ProductId,
    pub name: String,
    pub requested: u32,
    pub available: u32,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShopError {
    #[error("Product with ID {0} not found")]
    ProductNotFound(ProductId),
    #[error("Product with ID {0} not in cart")]
    NotInCart(ProductId),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Checkout failed: {}", describe_shortfalls(.0))]
    InsufficientStock(Vec<StockShortfall>),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
    /// Shop state disagreed with itself, e.g. stock ran out between validation and withdrawal.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::ProductNotFound(_) | ShopError::NotInCart(_) => ErrorKind::NotFound,
            ShopError::InvalidInput(_) => ErrorKind::InvalidInput,
            ShopError::EmptyCart => ErrorKind::EmptyCart,
            ShopError::InsufficientStock(_) => ErrorKind::InsufficientStock,
            ShopError::ActorCommunicationError(_) => ErrorKind::Unavailable,
            ShopError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Offending entries of a failed checkout; empty for every other error.
    pub fn shortfalls(&self) -> &[StockShortfall] {
        match self {
            ShopError::InsufficientStock(shortfalls) => shortfalls,
            _ => &[],
        }
    }
}

fn describe_shortfalls(shortfalls: &[StockShortfall]) -> String {
    shortfalls
        .iter()
        .map(|s| {
            format!(
                "{}: Insufficient stock (Available: {}, Requested: {})",
                s.name, s.available, s.requested
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}
