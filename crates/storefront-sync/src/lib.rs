//! # storefront-sync: Observable Stores for the Storefront Engine
//!
//! Adapts the remote collection clients into subscribable, re-render-ready
//! state, and owns the cart session and the checkout flow.
//!
//! ## Module Organization
//! ```text
//! storefront_sync/
//! ├── lib.rs          ◄─── You are here (exports, tracing init)
//! ├── snapshot.rs     ◄─── StoreSnapshot {collection, loading, error}
//! ├── products.rs     ◄─── ProductStore (catalog state)
//! ├── orders.rs       ◄─── OrderStore (order-lifecycle state)
//! ├── cart.rs         ◄─── CartSession (per-page-load cart holder)
//! ├── checkout.rs     ◄─── cart ──► order creation flow
//! └── error.rs        ◄─── SyncError
//! ```
//!
//! ## Observation Model
//! There is no implicit re-render here; the mechanism is an explicit
//! subscription: every store and the cart session publish through a
//! `tokio::sync::watch` channel. `subscribe()`
//! returns a receiver whose `changed().await` wakes on every transition
//! and whose `borrow()` always yields the latest snapshot. Late
//! subscribers see current state immediately, not a replay.
//!
//! "Concurrency" here is interleaved async operations on one logical
//! session, not parallelism: no ordering is guaranteed across independent
//! in-flight requests, and whichever response lands last determines the
//! final snapshot.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod orders;
pub mod products;
pub mod snapshot;

pub use cart::CartSession;
pub use checkout::checkout;
pub use error::{SyncError, SyncResult};
pub use orders::OrderStore;
pub use products::ProductStore;
pub use snapshot::StoreSnapshot;

/// Initializes the global tracing subscriber.
///
/// Default level is INFO; override with `RUST_LOG`. Safe to call more
/// than once; later calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// =============================================================================
// Test Support
// =============================================================================
