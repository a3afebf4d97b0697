//! # storefront-client: Remote Collection Clients
//!
//! Per-entity REST clients that pair backend calls with a local cache
//! mirror of the last-fetched collection.
//!
//! ## Module Organization
//! ```text
//! storefront_client/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── config.rs       ◄─── API endpoint configuration (TOML + env)
//! ├── transport.rs    ◄─── ApiTransport trait + reqwest implementation
//! ├── products.rs     ◄─── ProductClient (CRUD + local search)
//! ├── orders.rs       ◄─── OrderClient (CRUD + pay/cancel/status)
//! └── error.rs        ◄─── ClientError
//! ```
//!
//! ## Cache Semantics
//! The cache inside each client mirrors the server's collection as of the
//! last `fetch_all`, updated optimistically by mutation calls. It is NOT
//! authoritative; the server is. Concurrent edits to the same entity from
//! two actors are not detected; the later response wins (last-write-wins,
//! accepted behavior). There is no request deduplication, cancellation,
//! or automatic retry: a failed request surfaces immediately.

pub mod config;
pub mod error;
pub mod orders;
pub mod products;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use orders::OrderClient;
pub use products::ProductClient;
pub use transport::{ApiTransport, HttpTransport, Method};
