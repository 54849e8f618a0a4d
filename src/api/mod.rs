//! Transport-neutral request boundary: JSON payloads in, JSON payloads out.
//!
//! Every request becomes exactly one [`ShopClient`] call, so each one is applied atomically by
//! the shop service.

mod dto;

pub use dto::*;

use tracing::{debug, instrument, warn};

use crate::clients::ShopClient;
use crate::domain::CartChange;
use crate::error::ShopError;

pub const OPERATIONS: [&str; 8] = [
    "info",
    "list_products",
    "get_product",
    "add_to_cart",
    "update_cart",
    "view_cart",
    "clear_cart",
    "checkout",
];

/// Runs one decoded request against the shop and shapes the reply.
#[instrument(skip(client))]
pub async fn dispatch(client: &ShopClient, request: ApiRequest) -> ApiResponse {
    let result = match request {
        ApiRequest::Info => Ok(ApiResponse::Info(service_info())),
        ApiRequest::ListProducts => client.list_products().await.map(ApiResponse::Products),
        ApiRequest::GetProduct(lookup) => {
            client.get_product(lookup.product_id).await.map(ApiResponse::Product)
        }
        ApiRequest::AddToCart(item) => add_to_cart(client, item).await,
        ApiRequest::UpdateCart(item) => update_cart(client, item).await,
        ApiRequest::ViewCart => client.view_cart().await.map(ApiResponse::Cart),
        ApiRequest::ClearCart => client.clear_cart().await.map(|()| {
            ApiResponse::Success(SuccessResponse {
                success: true,
                message: "Cart cleared".to_string(),
            })
        }),
        ApiRequest::Checkout => client.checkout().await.map(|order| {
            ApiResponse::Checkout(CheckoutResponse {
                success: true,
                message: "Order placed successfully".to_string(),
                order_summary: order.into(),
            })
        }),
    };

    result.unwrap_or_else(|e| {
        debug!(error = %e, "Request failed");
        error_response(&e)
    })
}

/// Decodes one JSON request line and dispatches it. Malformed input is `invalid_input`.
pub async fn dispatch_line(client: &ShopClient, line: &str) -> ApiResponse {
    match serde_json::from_str::<ApiRequest>(line) {
        Ok(request) => dispatch(client, request).await,
        Err(e) => {
            warn!(error = %e, "Malformed request");
            error_response(&ShopError::InvalidInput(format!("Malformed request: {}", e)))
        }
    }
}

pub fn error_response(error: &ShopError) -> ApiResponse {
    ApiResponse::Error(ErrorResponse::from(error))
}

fn service_info() -> ServiceInfo {
    ServiceInfo {
        message: "E-Commerce API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        operations: OPERATIONS.iter().map(|op| op.to_string()).collect(),
    }
}

async fn add_to_cart(client: &ShopClient, item: CartItemRequest) -> Result<ApiResponse, ShopError> {
    let update = client.add_item(item.product_id, item.quantity).await?;
    Ok(ApiResponse::CartChanged(CartChangedResponse {
        success: true,
        message: format!("Added {} x {} to cart", item.quantity, update.product_name),
        cart: update.cart,
    }))
}

async fn update_cart(client: &ShopClient, item: CartItemRequest) -> Result<ApiResponse, ShopError> {
    let update = client.update_item(item.product_id, item.quantity).await?;
    let message = match update.change {
        CartChange::Updated(quantity) => {
            format!("Updated {} quantity to {}", update.product_name, quantity)
        }
        CartChange::Removed => format!("Removed {} from cart", update.product_name),
    };
    Ok(ApiResponse::CartChanged(CartChangedResponse {
        success: true,
        message,
        cart: update.cart,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{create_mock_client, expect_add_item, expect_checkout};
    use crate::domain::{CartLine, CartView, Order, OrderLine};
    use crate::error::ErrorKind;
    use crate::messages::CartUpdate;
    use rust_decimal::Decimal;

    #[test]
    fn decodes_tagged_requests() {
        let request: ApiRequest =
            serde_json::from_str(r#"{"op":"add_to_cart","productId":101,"quantity":2}"#).unwrap();
        assert_eq!(
            request,
            ApiRequest::AddToCart(CartItemRequest { product_id: 101, quantity: 2 })
        );

        let request: ApiRequest = serde_json::from_str(r#"{"op":"checkout"}"#).unwrap();
        assert_eq!(request, ApiRequest::Checkout);
    }

    #[tokio::test]
    async fn info_lists_every_operation() {
        let (client, _receiver) = create_mock_client(1);

        match dispatch_line(&client, r#"{"op":"info"}"#).await {
            ApiResponse::Info(info) => {
                assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
                assert_eq!(info.operations.len(), OPERATIONS.len());
                assert!(info.operations.iter().any(|op| op == "checkout"));
            }
            other => panic!("Unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_lines_are_invalid_input() {
        let (client, _receiver) = create_mock_client(1);

        for line in [r#"{"op":"add_to_cart","productId":101}"#, "not json", r#"{"op":"refund"}"#] {
            match dispatch_line(&client, line).await {
                ApiResponse::Error(err) => {
                    assert_eq!(err.error, ErrorKind::InvalidInput);
                    assert_eq!(err.status, 400);
                }
                other => panic!("Unexpected response: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn add_to_cart_names_the_product() {
        let (client, mut receiver) = create_mock_client(4);

        let request_task = tokio::spawn(async move {
            dispatch(&client, ApiRequest::AddToCart(CartItemRequest { product_id: 102, quantity: 3 })).await
        });

        let (product_id, quantity, responder) =
            expect_add_item(&mut receiver).await.expect("Expected AddItem request");
        assert_eq!((product_id, quantity), (102, 3));
        let cart = CartView {
            items: vec![CartLine {
                product_id: 102,
                name: "Wireless Mouse".into(),
                price: Decimal::new(2500, 2),
                quantity: 3,
                subtotal: Decimal::new(7500, 2),
            }],
            total_items: 3,
            total_price: Decimal::new(7500, 2),
        };
        responder
            .send(Ok(CartUpdate { change: 3, product_name: "Wireless Mouse".into(), cart }))
            .unwrap();

        match request_task.await.unwrap() {
            ApiResponse::CartChanged(response) => {
                assert!(response.success);
                assert_eq!(response.message, "Added 3 x Wireless Mouse to cart");
                assert_eq!(response.cart.total_items, 3);
            }
            other => panic!("Unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn checkout_shortfall_becomes_conflict() {
        let (client, mut receiver) = create_mock_client(4);

        let request_task = tokio::spawn(async move { dispatch(&client, ApiRequest::Checkout).await });

        let responder = expect_checkout(&mut receiver).await.expect("Expected Checkout request");
        responder
            .send(Err(ShopError::InsufficientStock(vec![crate::error::StockShortfall {
                product_id: 103,
                name: "USB-C Hub".into(),
                requested: 3,
                available: 2,
            }])))
            .unwrap();

        let response = request_task.await.unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], 409);
        assert_eq!(json["error"], "insufficient_stock");
        assert_eq!(json["shortfalls"][0]["product_id"], 103);
    }

    #[tokio::test]
    async fn checkout_summary_uses_order_totals() {
        let (client, mut receiver) = create_mock_client(4);

        let request_task = tokio::spawn(async move { dispatch(&client, ApiRequest::Checkout).await });

        let responder = expect_checkout(&mut receiver).await.expect("Expected Checkout request");
        responder
            .send(Ok(Order {
                items: vec![OrderLine {
                    product_id: 104,
                    name: "Monitor Stand".into(),
                    unit_price: Decimal::new(5000, 2),
                    quantity: 2,
                    subtotal: Decimal::new(10000, 2),
                }],
                total_items: 2,
                total: Decimal::new(10000, 2),
            }))
            .unwrap();

        match request_task.await.unwrap() {
            ApiResponse::Checkout(response) => {
                assert_eq!(response.message, "Order placed successfully");
                assert_eq!(response.order_summary.total_price, Decimal::new(10000, 2));
                assert_eq!(response.order_summary.total_items, 2);
            }
            other => panic!("Unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn stopped_service_is_unavailable() {
        let (client, receiver) = create_mock_client(1);
        drop(receiver);

        let response = dispatch(&client, ApiRequest::ViewCart).await;
        match response {
            ApiResponse::Error(err) => {
                assert_eq!(err.error, ErrorKind::Unavailable);
                assert_eq!(err.status, 503);
            }
            other => panic!("Unexpected response: {:?}", other),
        }
    }
}
