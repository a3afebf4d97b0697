//! # Checkout Flow
//!
//! The cross-component protocol that turns a cart into an order.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          checkout()                                     │
//! │                                                                         │
//! │  1. cart empty? ───────────► Err(Rejected), NO network call             │
//! │  2. flatten lines to distinct product snapshots                         │
//! │  3. OrderStore::create(products, payment_method)                        │
//! │       │                                                                 │
//! │       ├── Ok(order) ──► clear cart ──► return order                     │
//! │       │   (status Pending; amount may still be unset while the          │
//! │       │    backend finishes pricing)                                    │
//! │       │                                                                 │
//! │       └── Err ──► cart left untouched, error propagates so the          │
//! │                   create-order dialog can stay open                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use storefront_core::types::{Order, PaymentMethod};

use crate::cart::CartSession;
use crate::error::{SyncError, SyncResult};
use crate::orders::OrderStore;

/// Creates an order from the current cart, clearing the cart on success.
pub async fn checkout(
    cart: &CartSession,
    orders: &OrderStore,
    payment_method: PaymentMethod,
) -> SyncResult<Order> {
    let state = cart.snapshot();
    if state.is_empty() {
        return Err(SyncError::Rejected("cart is empty".to_string()));
    }

    // TODO: forward per-line quantities once the orders endpoint accepts
    // them; today the backend receives only the distinct products list.
    let products = state.products();

    let order = orders.create(products, payment_method).await?;

    cart.clear();
    info!(order_id = %order.id, "Checkout complete; cart cleared");

    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product_body, ScriptedTransport};
    use serde_json::json;
    use std::sync::Arc;

    use storefront_client::OrderClient;
    use storefront_core::money::Money;
    use storefront_core::types::{OrderStatus, Product};

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            unit_price: Money::from_cents(price_cents),
            units_in_stock: 10,
            is_active: true,
        }
    }

    async fn empty_order_store() -> (Arc<ScriptedTransport>, OrderStore) {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(Ok(Some(json!([]))));

        let client = Arc::new(OrderClient::new(transport.clone()));
        let store = OrderStore::load(client).await;
        (transport, store)
    }

    fn created_order_body(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "paymentMethod": "Card",
            "orderStatus": "Pending",
            "fees": [],
            "products": [product_body("p-1", "Product p-1", 500, 10)],
        })
    }

    #[tokio::test]
    async fn test_empty_cart_aborts_before_network() {
        let (transport, orders) = empty_order_store().await;
        let cart = CartSession::new();
        let requests_before = transport.request_count();

        let err = checkout(&cart, &orders, PaymentMethod::Card)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("empty"));
        assert_eq!(transport.request_count(), requests_before);
    }

    #[tokio::test]
    async fn test_success_appends_order_and_clears_cart() {
        let (transport, orders) = empty_order_store().await;
        let cart = CartSession::new();
        cart.add_to_cart(&product("p-1", 500), 2).unwrap();
        cart.add_to_cart(&product("p-2", 300), 1).unwrap();

        transport.push_response(Ok(Some(created_order_body("o-1"))));

        let order = checkout(&cart, &orders, PaymentMethod::Card).await.unwrap();

        assert_eq!(order.id, "o-1");
        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.amount, None);

        assert!(cart.snapshot().is_empty());
        assert_eq!(orders.snapshot().collection.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_leaves_cart_untouched() {
        let (transport, orders) = empty_order_store().await;
        let cart = CartSession::new();
        cart.add_to_cart(&product("p-1", 500), 2).unwrap();
        let before = cart.snapshot();

        transport.push_response(Err(storefront_client::ClientError::Http { status: 500 }));

        let result = checkout(&cart, &orders, PaymentMethod::Card).await;

        assert!(result.is_err());
        assert_eq!(cart.snapshot(), before);
        assert!(orders.snapshot().collection.is_empty());
        assert_eq!(orders.snapshot().error.as_deref(), Some("API error: 500"));
    }

    #[tokio::test]
    async fn test_merged_lines_flatten_to_distinct_products() {
        let (transport, orders) = empty_order_store().await;
        let cart = CartSession::new();
        // Same product added twice merges into one line, so the payload
        // carries it once.
        cart.add_to_cart(&product("p-1", 500), 1).unwrap();
        cart.add_to_cart(&product("p-1", 500), 1).unwrap();

        transport.push_response(Ok(Some(created_order_body("o-1"))));

        checkout(&cart, &orders, PaymentMethod::Transfer)
            .await
            .unwrap();

        // One fetch at load + one create.
        assert_eq!(transport.request_count(), 2);
    }
}
