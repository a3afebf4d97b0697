//! # storefront-core: Pure Business Logic for the Storefront Engine
//!
//! This crate is the **heart** of the storefront engine. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Layer (not in repo)                │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Orders UI         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ watch subscriptions                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-sync                              │   │
//! │  │    ProductStore, OrderStore, CartSession, checkout              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-client                            │   │
//! │  │    ProductClient, OrderClient (REST + local cache mirror)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│   │   │
//! │  │   │  Product  │  │   Money   │  │ CartState │  │   rules   │   │   │
//! │  │   │   Order   │  │  formats  │  │  reducer  │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Fee, statuses)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart reducer: pure state transitions over commands
//! - [`error`] - Validation error types
//! - [`validation`] - Input and business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Total Cart Transitions**: the cart reducer never fails; invalid input
//!    degrades to a no-op or a clamped value
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::{CartCommand, CartState};
//! use storefront_core::money::Money;
//! use storefront_core::types::Product;
//!
//! let product = Product {
//!     id: "p-1".into(),
//!     name: "Espresso Cup".into(),
//!     unit_price: Money::from_cents(1250),
//!     units_in_stock: 4,
//!     is_active: true,
//! };
//!
//! let state = CartState::default().apply(CartCommand::AddToCart {
//!     product,
//!     quantity: 2,
//! });
//!
//! assert_eq!(state.total, Money::from_cents(2500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use cart::{CartCommand, CartLine, CartState};
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of distinct lines allowed in a single cart.
///
/// Adding a new product to a full cart is ignored by the reducer; existing
/// lines can still change quantity.
pub const MAX_CART_LINES: usize = 99;

/// Stock level at or below which a product counts as running low.
///
/// Display hint only; it does not affect whether a product can be carted.
pub const LOW_STOCK_THRESHOLD: i64 = 5;
