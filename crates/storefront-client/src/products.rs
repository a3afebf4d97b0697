//! # Product Client
//!
//! REST operations for the product catalog, mirrored into a local cache.
//!
//! ## Cache Mirror
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ProductClient Cache Mirror                          │
//! │                                                                         │
//! │  fetch_all ───────► GET /products ─────────► replace whole cache        │
//! │  create ──────────► POST /products ────────► append returned entity     │
//! │  update ──┬─ absent locally? ── NO REQUEST, NotFoundLocally             │
//! │           └─ PUT /products?id= ────────────► replace cached entry       │
//! │  delete ──┬─ absent locally? ── NO REQUEST, NotFoundLocally             │
//! │           └─ DELETE /products?id= ─────────► remove cached entry        │
//! │  search ──────────► no network ────────────► filter cached names        │
//! │                                                                         │
//! │  On ANY failure the cache is left exactly as it was.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `search`, `active`, and `set_stock` are purely local: their results are
//! only as fresh as the last `fetch_all`.

use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tracing::debug;

use storefront_core::types::{Product, ProductDraft};

use crate::error::{ClientError, ClientResult};
use crate::transport::{decode, decode_echo, ApiTransport, Method};

/// Envelope the backend wraps collection reads in: `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
pub struct GridResponse<T> {
    pub data: T,
}

/// REST client for the product collection.
///
/// The cache is instance-owned: independent clients never share state, so
/// tests can construct as many as they need without leakage.
pub struct ProductClient {
    transport: Arc<dyn ApiTransport>,
    cache: Mutex<Vec<Product>>,
}

impl ProductClient {
    /// Creates a client with an empty cache.
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        ProductClient {
            transport,
            cache: Mutex::new(Vec::new()),
        }
    }

    /// A snapshot of the cached collection.
    pub fn cached(&self) -> Vec<Product> {
        self.cache.lock().expect("product cache poisoned").clone()
    }

    // =========================================================================
    // Remote Operations
    // =========================================================================

    /// Fetches the full catalog and replaces the cache with it.
    ///
    /// On failure the cache keeps its previous contents.
    pub async fn fetch_all(&self) -> ClientResult<Vec<Product>> {
        debug!("Fetching all products");
        let body = self.transport.send(Method::Get, "products", None).await?;
        let response: GridResponse<Vec<Product>> = decode(body)?;

        let mut cache = self.cache.lock().expect("product cache poisoned");
        *cache = response.data.clone();

        debug!(count = response.data.len(), "Product cache replaced");
        Ok(response.data)
    }

    /// Looks up a single product on the server.
    ///
    /// A server-side 404 is a domain answer, not a failure: it maps to
    /// `Ok(None)`.
    pub async fn fetch_by_id(&self, id: &str) -> ClientResult<Option<Product>> {
        debug!(%id, "Fetching product by id");
        let result = self
            .transport
            .send(Method::Get, &format!("products/id={id}"), None)
            .await;

        match result {
            Ok(body) => Ok(Some(decode(body)?)),
            Err(err) if err.is_http_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Creates a product and appends the server-returned entity (with its
    /// assigned id) to the cache.
    pub async fn create(&self, draft: ProductDraft) -> ClientResult<Product> {
        debug!(name = %draft.name, "Creating product");
        let payload =
            serde_json::to_value(&draft).map_err(|err| ClientError::Decode(err.to_string()))?;
        let body = self
            .transport
            .send(Method::Post, "products", Some(payload))
            .await?;
        let created: Product = decode(body)?;

        let mut cache = self.cache.lock().expect("product cache poisoned");
        cache.push(created.clone());

        Ok(created)
    }

    /// Updates a product.
    ///
    /// ## Local Guard
    /// If `id` is absent from the cache the call fails with
    /// `NotFoundLocally` **before any request is issued**; the client does
    /// not update something it doesn't believe exists.
    ///
    /// ## Cache Entry
    /// The server response wins when it echoes the entity; otherwise the
    /// cache falls back to `draft + id` (the client's own view).
    pub async fn update(&self, id: &str, draft: ProductDraft) -> ClientResult<Product> {
        self.guard_cached(id)?;

        debug!(%id, "Updating product");
        let payload =
            serde_json::to_value(&draft).map_err(|err| ClientError::Decode(err.to_string()))?;
        let body = self
            .transport
            .send(Method::Put, &format!("products?id={id}"), Some(payload))
            .await?;

        let updated = decode_echo::<Product>(body).unwrap_or_else(|| draft.with_id(id));

        let mut cache = self.cache.lock().expect("product cache poisoned");
        if let Some(entry) = cache.iter_mut().find(|product| product.id == id) {
            *entry = updated.clone();
        }

        Ok(updated)
    }

    /// Deletes a product. Same local guard as [`ProductClient::update`].
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.guard_cached(id)?;

        debug!(%id, "Deleting product");
        self.transport
            .send(Method::Delete, &format!("products?id={id}"), None)
            .await?;

        let mut cache = self.cache.lock().expect("product cache poisoned");
        cache.retain(|product| product.id != id);

        Ok(())
    }

    // =========================================================================
    // Local Operations (no network)
    // =========================================================================

    /// Case-insensitive substring search over cached product names.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        self.cache
            .lock()
            .expect("product cache poisoned")
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Cached products currently flagged active.
    pub fn active(&self) -> Vec<Product> {
        self.cache
            .lock()
            .expect("product cache poisoned")
            .iter()
            .filter(|product| product.is_active)
            .cloned()
            .collect()
    }

    /// Overrides the cached stock level for a product.
    ///
    /// Local bookkeeping only; nothing is sent to the server.
    pub fn set_stock(&self, id: &str, units_in_stock: i64) -> ClientResult<Product> {
        let mut cache = self.cache.lock().expect("product cache poisoned");
        let product = cache
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| ClientError::not_found_locally("Product", id))?;

        product.units_in_stock = units_in_stock;
        Ok(product.clone())
    }

    /// The shared mutation guard: entity must exist in the local mirror.
    fn guard_cached(&self, id: &str) -> ClientResult<()> {
        let cache = self.cache.lock().expect("product cache poisoned");
        if cache.iter().any(|product| product.id == id) {
            Ok(())
        } else {
            Err(ClientError::not_found_locally("Product", id))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
