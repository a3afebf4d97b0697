//! # Product Store
//!
//! Observable catalog state backed by [`ProductClient`].
//!
//! ## Two-Phase Mutations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 create / update / delete                                │
//! │                                                                         │
//! │  validate draft ── violations? ──► Err(Validation), NO network call     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductClient call (network)                                           │
//! │       │                                                                 │
//! │       ├── Ok ───► apply local transform (append/replace/remove)         │
//! │       │           clear snapshot.error, notify subscribers              │
//! │       │                                                                 │
//! │       └── Err ──► snapshot.error = display string, notify,              │
//! │                   re-raise so the caller can branch (dialog, alert)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store never performs UI actions; it only records and re-raises.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use storefront_client::{ClientError, ProductClient};
use storefront_core::types::{Product, ProductDraft};
use storefront_core::validation::{validate_product, validate_search_query};

use crate::error::{SyncError, SyncResult};
use crate::snapshot::StoreSnapshot;

/// Observable store over the product collection.
pub struct ProductStore {
    client: Arc<ProductClient>,
    tx: watch::Sender<StoreSnapshot<Product>>,
}

impl ProductStore {
    /// Creates the store and performs the initial fetch.
    ///
    /// A failed initial fetch is captured in the snapshot (`error` set,
    /// empty collection) rather than returned; rendering the full-page
    /// error state is the subscriber's call.
    pub async fn load(client: Arc<ProductClient>) -> Self {
        let (tx, _) = watch::channel(StoreSnapshot::initial());
        let store = ProductStore { client, tx };
        store.refresh().await;
        store
    }

    /// Subscribes to snapshot changes. The receiver immediately sees the
    /// current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot<Product>> {
        self.tx.subscribe()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> StoreSnapshot<Product> {
        self.tx.borrow().clone()
    }

    /// Refetches the whole collection, replacing the snapshot.
    ///
    /// Failures land in `snapshot.error`; the previous collection is
    /// discarded only on success.
    pub async fn refresh(&self) {
        self.tx.send_modify(|snapshot| {
            snapshot.loading = true;
            snapshot.error = None;
        });

        match self.client.fetch_all().await {
            Ok(products) => {
                debug!(count = products.len(), "Product store refreshed");
                self.tx.send_modify(|snapshot| {
                    snapshot.collection = products;
                    snapshot.loading = false;
                });
            }
            Err(err) => {
                warn!(%err, "Product refresh failed");
                let message = err.to_string();
                self.tx.send_modify(|snapshot| {
                    snapshot.loading = false;
                    snapshot.error = Some(message);
                });
            }
        }
    }

    /// Validates and creates a product, appending it to the snapshot.
    pub async fn create(&self, draft: ProductDraft) -> SyncResult<Product> {
        let violations = validate_product(&draft);
        if !violations.is_empty() {
            return Err(SyncError::validation(violations));
        }

        match self.client.create(draft).await {
            Ok(product) => {
                self.tx.send_modify(|snapshot| {
                    snapshot.collection.push(product.clone());
                    snapshot.error = None;
                });
                Ok(product)
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Validates and updates a product, replacing it in the snapshot.
    pub async fn update(&self, id: &str, draft: ProductDraft) -> SyncResult<Product> {
        let violations = validate_product(&draft);
        if !violations.is_empty() {
            return Err(SyncError::validation(violations));
        }

        match self.client.update(id, draft).await {
            Ok(product) => {
                self.tx.send_modify(|snapshot| {
                    if let Some(entry) = snapshot
                        .collection
                        .iter_mut()
                        .find(|existing| existing.id == id)
                    {
                        *entry = product.clone();
                    }
                    snapshot.error = None;
                });
                Ok(product)
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Deletes a product, removing it from the snapshot.
    pub async fn delete(&self, id: &str) -> SyncResult<()> {
        match self.client.delete(id).await {
            Ok(()) => {
                self.tx.send_modify(|snapshot| {
                    snapshot.collection.retain(|product| product.id != id);
                    snapshot.error = None;
                });
                Ok(())
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Local catalog search over the client's cache (no network).
    pub fn search(&self, query: &str) -> SyncResult<Vec<Product>> {
        let query = validate_search_query(query)
            .map_err(|violation| SyncError::validation(vec![violation]))?;
        Ok(self.client.search(&query))
    }

    /// Stores the failure for subscribers and converts it for the caller.
    fn record_failure(&self, err: ClientError) -> SyncError {
        warn!(%err, "Product operation failed");
        let message = err.to_string();
        self.tx
            .send_modify(|snapshot| snapshot.error = Some(message));
        SyncError::Remote(err)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
