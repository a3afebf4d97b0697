//! # Order Store
//!
//! Observable order-lifecycle state backed by [`OrderClient`].
//!
//! Follows the same two-phase mutation pattern as the product store:
//! client call first, local transform on success, recorded + re-raised
//! failure otherwise. The client-initiated transitions (`pay`, `cancel`,
//! `update_status`) replace the affected order with whatever the server
//! returned: the server drives the lifecycle and the store mirrors it.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use storefront_client::{ClientError, OrderClient};
use storefront_core::types::{Order, OrderDraft, OrderStatus, PaymentMethod, Product};
use storefront_core::validation::validate_order;

use crate::error::{SyncError, SyncResult};
use crate::snapshot::StoreSnapshot;

/// Observable store over the order collection.
pub struct OrderStore {
    client: Arc<OrderClient>,
    tx: watch::Sender<StoreSnapshot<Order>>,
}

impl OrderStore {
    /// Creates the store and performs the initial fetch.
    pub async fn load(client: Arc<OrderClient>) -> Self {
        let (tx, _) = watch::channel(StoreSnapshot::initial());
        let store = OrderStore { client, tx };
        store.refresh().await;
        store
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot<Order>> {
        self.tx.subscribe()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> StoreSnapshot<Order> {
        self.tx.borrow().clone()
    }

    /// Refetches the whole collection, replacing the snapshot.
    pub async fn refresh(&self) {
        self.tx.send_modify(|snapshot| {
            snapshot.loading = true;
            snapshot.error = None;
        });

        match self.client.fetch_all().await {
            Ok(orders) => {
                debug!(count = orders.len(), "Order store refreshed");
                self.tx.send_modify(|snapshot| {
                    snapshot.collection = orders;
                    snapshot.loading = false;
                });
            }
            Err(err) => {
                warn!(%err, "Order refresh failed");
                let message = err.to_string();
                self.tx.send_modify(|snapshot| {
                    snapshot.loading = false;
                    snapshot.error = Some(message);
                });
            }
        }
    }

    /// Validates and creates an order from product snapshots and a payment
    /// method, appending the server-returned order to the snapshot.
    pub async fn create(
        &self,
        products: Vec<Product>,
        payment_method: PaymentMethod,
    ) -> SyncResult<Order> {
        let draft = OrderDraft {
            products,
            payment_method,
        };

        let violations = validate_order(&draft);
        if !violations.is_empty() {
            return Err(SyncError::validation(violations));
        }

        match self.client.create(draft).await {
            Ok(order) => {
                self.tx.send_modify(|snapshot| {
                    snapshot.collection.push(order.clone());
                    snapshot.error = None;
                });
                Ok(order)
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Requests a server-side status change and mirrors the result.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> SyncResult<Order> {
        match self.client.update_status(id, status).await {
            Ok(order) => Ok(self.replace(order)),
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Requests payment and mirrors the result.
    pub async fn pay(&self, id: &str) -> SyncResult<Order> {
        match self.client.pay(id).await {
            Ok(order) => Ok(self.replace(order)),
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Requests cancellation and mirrors the result.
    pub async fn cancel(&self, id: &str) -> SyncResult<Order> {
        match self.client.cancel(id).await {
            Ok(order) => Ok(self.replace(order)),
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Permanently deletes an order and drops it from the snapshot.
    pub async fn delete(&self, id: &str) -> SyncResult<()> {
        match self.client.delete(id).await {
            Ok(()) => {
                self.tx.send_modify(|snapshot| {
                    snapshot.collection.retain(|order| order.id != id);
                    snapshot.error = None;
                });
                Ok(())
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Replaces the snapshot entry matching the returned order.
    fn replace(&self, order: Order) -> Order {
        self.tx.send_modify(|snapshot| {
            if let Some(entry) = snapshot
                .collection
                .iter_mut()
                .find(|existing| existing.id == order.id)
            {
                *entry = order.clone();
            }
            snapshot.error = None;
        });
        order
    }

    /// Stores the failure for subscribers and converts it for the caller.
    fn record_failure(&self, err: ClientError) -> SyncError {
        warn!(%err, "Order operation failed");
        let message = err.to_string();
        self.tx
            .send_modify(|snapshot| snapshot.error = Some(message));
        SyncError::Remote(err)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product_body, ScriptedTransport};
    use serde_json::{json, Value};
    use storefront_core::money::Money;

    fn order_body(id: &str, status: &str) -> Value {
        json!({
            "id": id,
            "paymentMethod": "Card",
            "orderStatus": status,
            "fees": [],
            "products": [product_body("p-1", "Test Product", 100, 1)],
        })
    }

    fn snapshot_product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Test Product".to_string(),
            unit_price: Money::from_cents(100),
            units_in_stock: 1,
            is_active: true,
        }
    }

    async fn loaded_store() -> (Arc<ScriptedTransport>, OrderStore) {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(Ok(Some(json!([order_body("o-1", "Pending")]))));

        let client = Arc::new(OrderClient::new(transport.clone()));
        let store = OrderStore::load(client).await;
        (transport, store)
    }

    #[tokio::test]
    async fn test_load_fetches_initial_collection() {
        let (_, store) = loaded_store().await;

        let snapshot = store.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.collection.len(), 1);
        assert_eq!(snapshot.collection[0].order_status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_requires_products() {
        let (transport, store) = loaded_store().await;
        let requests_before = transport.request_count();

        let err = store
            .create(vec![], PaymentMethod::Card)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("product"));
        assert_eq!(transport.request_count(), requests_before);
    }

    #[tokio::test]
    async fn test_create_appends_returned_order() {
        let (transport, store) = loaded_store().await;
        transport.push_response(Ok(Some(order_body("o-2", "Pending"))));

        let order = store
            .create(vec![snapshot_product()], PaymentMethod::Transfer)
            .await
            .unwrap();

        assert_eq!(order.id, "o-2");
        assert_eq!(store.snapshot().collection.len(), 2);
    }

    #[tokio::test]
    async fn test_pay_mirrors_server_status() {
        let (transport, store) = loaded_store().await;
        transport.push_response(Ok(Some(order_body("o-1", "Paid"))));

        let paid = store.pay("o-1").await.unwrap();

        assert_eq!(paid.order_status, OrderStatus::Paid);
        assert_eq!(
            store.snapshot().collection[0].order_status,
            OrderStatus::Paid
        );
    }

    #[tokio::test]
    async fn test_cancel_mirrors_server_status() {
        let (transport, store) = loaded_store().await;
        transport.push_response(Ok(Some(order_body("o-1", "Cancelled"))));

        store.cancel("o-1").await.unwrap();

        assert_eq!(
            store.snapshot().collection[0].order_status,
            OrderStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_update_status_mirrors_server() {
        let (transport, store) = loaded_store().await;
        transport.push_response(Ok(Some(order_body("o-1", "Shipped"))));

        store
            .update_status("o-1", OrderStatus::Shipped)
            .await
            .unwrap();

        assert_eq!(
            store.snapshot().collection[0].order_status,
            OrderStatus::Shipped
        );
    }

    #[tokio::test]
    async fn test_delete_drops_order() {
        let (transport, store) = loaded_store().await;
        transport.push_response(Ok(None));

        store.delete("o-1").await.unwrap();

        assert!(store.snapshot().collection.is_empty());
    }

    #[tokio::test]
    async fn test_pay_failure_sets_error_and_reraises() {
        let (transport, store) = loaded_store().await;
        transport.push_response(Err(ClientError::Http { status: 500 }));

        let err = store.pay("o-1").await.unwrap_err();

        assert!(matches!(err, SyncError::Remote(_)));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some("API error: 500"));
        assert_eq!(snapshot.collection[0].order_status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_subscribers_observe_both_states() {
        let (transport, store) = loaded_store().await;
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        transport.push_response(Err(ClientError::Http { status: 500 }));
        let _ = store.pay("o-1").await;

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().error.is_some());

        transport.push_response(Ok(Some(order_body("o-1", "Paid"))));
        store.pay("o-1").await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().error.is_none());
    }
}
