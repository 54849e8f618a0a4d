//! # Mock Framework
//!
//! Utilities for testing code that talks to the shop service without running the service.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its channel, then use
//! helpers like [`expect_add_item`] or [`expect_checkout`] to assert what was sent and to
//! script the reply.

use tokio::sync::{mpsc, oneshot};

use crate::clients::ShopClient;
use crate::domain::{CartView, Order, ProductId};
use crate::error::ShopError;
use crate::messages::{CartUpdate, ShopRequest};

type Reply<T> = oneshot::Sender<Result<T, ShopError>>;

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client(buffer_size: usize) -> (ShopClient, mpsc::Receiver<ShopRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ShopClient::new(sender), receiver)
}

/// Helper to verify that the next message is an AddItem request
pub async fn expect_add_item(
    receiver: &mut mpsc::Receiver<ShopRequest>,
) -> Option<(ProductId, i64, Reply<CartUpdate<u32>>)> {
    match receiver.recv().await {
        Some(ShopRequest::AddItem { product_id, quantity, respond_to }) => {
            Some((product_id, quantity, respond_to))
        }
        _ => None,
    }
}

/// Helper to verify that the next message is a ViewCart request
pub async fn expect_view_cart(
    receiver: &mut mpsc::Receiver<ShopRequest>,
) -> Option<Reply<CartView>> {
    match receiver.recv().await {
        Some(ShopRequest::ViewCart { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Checkout request
pub async fn expect_checkout(receiver: &mut mpsc::Receiver<ShopRequest>) -> Option<Reply<Order>> {
    match receiver.recv().await {
        Some(ShopRequest::Checkout { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let view_task = tokio::spawn(async move { client.view_cart().await });

        let responder = expect_view_cart(&mut receiver).await.expect("Expected ViewCart request");
        let empty = CartView { items: Vec::new(), total_items: 0, total_price: Decimal::ZERO };
        responder.send(Ok(empty.clone())).unwrap();

        let result = view_task.await.unwrap();
        assert_eq!(result, Ok(empty));
    }

    #[tokio::test]
    async fn dropped_reply_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let checkout_task = tokio::spawn(async move { client.checkout().await });

        let responder = expect_checkout(&mut receiver).await.expect("Expected Checkout request");
        drop(responder);

        let result = checkout_task.await.unwrap();
        assert!(matches!(result, Err(ShopError::ActorCommunicationError(_))));
    }
}
