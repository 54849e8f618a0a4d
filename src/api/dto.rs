use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{CartView, Order, OrderLine, Product, ProductId};
use crate::error::{ErrorKind, ShopError, StockShortfall};

/// One request at the boundary, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ApiRequest {
    Info,
    ListProducts,
    GetProduct(ProductLookup),
    AddToCart(CartItemRequest),
    UpdateCart(CartItemRequest),
    ViewCart,
    ClearCart,
    Checkout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLookup {
    pub product_id: ProductId,
}

/// Body of add/update requests. `quantity` stays signed so negatives reach validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Info(ServiceInfo),
    Products(Vec<Product>),
    Product(Product),
    CartChanged(CartChangedResponse),
    Cart(CartView),
    Success(SuccessResponse),
    Checkout(CheckoutResponse),
    Error(ErrorResponse),
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub operations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartChangedResponse {
    pub success: bool,
    pub message: String,
    pub cart: CartView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    pub order_summary: OrderSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub items: Vec<OrderLine>,
    pub total_items: u64,
    pub total_price: Decimal,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            items: order.items,
            total_items: order.total_items,
            total_price: order.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shortfalls: Vec<StockShortfall>,
}

impl From<&ShopError> for ErrorResponse {
    fn from(error: &ShopError) -> Self {
        let kind = error.kind();
        Self {
            status: kind.status_code(),
            error: kind,
            message: error.to_string(),
            shortfalls: error.shortfalls().to_vec(),
        }
    }
}
