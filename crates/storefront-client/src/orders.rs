//! # Order Client
//!
//! REST operations for payment orders, mirrored into a local cache.
//!
//! Orders differ from products on the wire: the list endpoint returns a
//! bare array (no `{data}` envelope), mutations address `/orders/{id}`
//! path segments, and the client-initiated transitions (`pay`, `cancel`,
//! `update_status`) each return the updated order, which replaces the
//! cached entry wholesale.
//!
//! Status transitions beyond those requests are server-driven; the cache
//! only ever reflects what the server last returned for an order.

use std::sync::{Arc, Mutex};

use tracing::debug;

use storefront_core::types::{Order, OrderDraft, OrderStatus};

use crate::error::{ClientError, ClientResult};
use crate::transport::{decode, ApiTransport, Method};

/// REST client for the order collection.
pub struct OrderClient {
    transport: Arc<dyn ApiTransport>,
    cache: Mutex<Vec<Order>>,
}

impl OrderClient {
    /// Creates a client with an empty cache.
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        OrderClient {
            transport,
            cache: Mutex::new(Vec::new()),
        }
    }

    /// A snapshot of the cached collection.
    pub fn cached(&self) -> Vec<Order> {
        self.cache.lock().expect("order cache poisoned").clone()
    }

    /// Fetches all orders and replaces the cache.
    ///
    /// On failure the cache keeps its previous contents.
    pub async fn fetch_all(&self) -> ClientResult<Vec<Order>> {
        debug!("Fetching all orders");
        let body = self.transport.send(Method::Get, "orders", None).await?;
        let orders: Vec<Order> = decode(body)?;

        let mut cache = self.cache.lock().expect("order cache poisoned");
        *cache = orders.clone();

        debug!(count = orders.len(), "Order cache replaced");
        Ok(orders)
    }

    /// Looks up a single order on the server; a 404 maps to `Ok(None)`.
    pub async fn fetch_by_id(&self, id: &str) -> ClientResult<Option<Order>> {
        debug!(%id, "Fetching order by id");
        let result = self
            .transport
            .send(Method::Get, &format!("orders/{id}"), None)
            .await;

        match result {
            Ok(body) => Ok(Some(decode(body)?)),
            Err(err) if err.is_http_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Creates an order from product snapshots and a payment method.
    ///
    /// The server assigns the id, sets the status to Pending, and may
    /// leave `amount` unset while pricing is still being computed. The
    /// returned order is appended to the cache.
    pub async fn create(&self, draft: OrderDraft) -> ClientResult<Order> {
        debug!(
            products = draft.products.len(),
            method = %draft.payment_method,
            "Creating order"
        );
        let payload =
            serde_json::to_value(&draft).map_err(|err| ClientError::Decode(err.to_string()))?;
        let body = self
            .transport
            .send(Method::Post, "orders", Some(payload))
            .await?;
        let created: Order = decode(body)?;

        let mut cache = self.cache.lock().expect("order cache poisoned");
        cache.push(created.clone());

        Ok(created)
    }

    /// Requests a status change; the server's returned order replaces the
    /// cached entry.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        self.guard_cached(id)?;

        debug!(%id, %status, "Updating order status");
        let body = self
            .transport
            .send(
                Method::Put,
                &format!("orders/{id}/status"),
                Some(serde_json::json!({ "status": status })),
            )
            .await?;

        self.replace_cached(decode(body)?)
    }

    /// Requests payment for an order.
    pub async fn pay(&self, id: &str) -> ClientResult<Order> {
        self.guard_cached(id)?;

        debug!(%id, "Paying order");
        let body = self
            .transport
            .send(Method::Post, &format!("orders/{id}/pay"), None)
            .await?;

        self.replace_cached(decode(body)?)
    }

    /// Requests cancellation of an order.
    pub async fn cancel(&self, id: &str) -> ClientResult<Order> {
        self.guard_cached(id)?;

        debug!(%id, "Cancelling order");
        let body = self
            .transport
            .send(Method::Post, &format!("orders/{id}/cancel"), None)
            .await?;

        self.replace_cached(decode(body)?)
    }

    /// Permanently deletes an order. Deletion is client-confirmed upstream;
    /// by the time this runs there is no undo.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.guard_cached(id)?;

        debug!(%id, "Deleting order");
        self.transport
            .send(Method::Delete, &format!("orders/{id}"), None)
            .await?;

        let mut cache = self.cache.lock().expect("order cache poisoned");
        cache.retain(|order| order.id != id);

        Ok(())
    }

    /// The shared mutation guard: entity must exist in the local mirror.
    fn guard_cached(&self, id: &str) -> ClientResult<()> {
        let cache = self.cache.lock().expect("order cache poisoned");
        if cache.iter().any(|order| order.id == id) {
            Ok(())
        } else {
            Err(ClientError::not_found_locally("Order", id))
        }
    }

    /// Replaces the cached entry matching the returned order's id.
    fn replace_cached(&self, order: Order) -> ClientResult<Order> {
        let mut cache = self.cache.lock().expect("order cache poisoned");
        if let Some(entry) = cache.iter_mut().find(|cached| cached.id == order.id) {
            *entry = order.clone();
        }
        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
