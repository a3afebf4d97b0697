//! # Cart Engine
//!
//! A pure reducer over cart state: `CartState::apply(command)` returns the
//! next state and never fails.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart State Transitions                             │
//! │                                                                         │
//! │  User Intent              Command                 State Change          │
//! │  ───────────              ───────                 ────────────          │
//! │                                                                         │
//! │  Click "Add" ───────────► AddToCart ────────────► merge or append line  │
//! │                                                                         │
//! │  Change quantity ───────► UpdateQuantity ───────► clamp / remove at 0   │
//! │                                                                         │
//! │  Click remove ──────────► RemoveFromCart ───────► drop matching line    │
//! │                                                                         │
//! │  Checkout / clear ──────► ClearCart ────────────► empty, total = 0      │
//! │                                                                         │
//! │  Every transition recomputes `total` from the surviving lines.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product.id` (adding the same product merges)
//! - `1 <= quantity <= product.units_in_stock` on every line
//! - Line order is insertion order (display order)
//! - `total` always equals the exact sum of `unit_price × quantity`
//!
//! ## Totality
//! Transitions never return errors: unknown ids are no-ops, excess
//! quantities clamp to stock, non-positive quantities remove (update) or
//! are ignored (add). The cart is a local optimistic cache, not a source
//! of truth, so every input maps to some valid state.
//!
//! The `is_active` / out-of-stock precondition for adds is the calling
//! boundary's job (`CartSession::add_to_cart` in storefront-sync); the
//! reducer does not re-check it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::MAX_CART_LINES;

// =============================================================================
// Cart Line
// =============================================================================

/// One (product, quantity) pair inside the cart.
///
/// The product is a **frozen snapshot** taken when the line was created.
/// If the catalog entry changes server-side, the line is not refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product snapshot at time of adding (frozen).
    pub product: Product,

    /// Quantity in cart. Always within `[1, product.units_in_stock]`.
    pub quantity: i64,

    /// When this line was first added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line from a product snapshot and a quantity.
    ///
    /// The caller is responsible for clamping; the reducer passes only
    /// already-valid quantities here.
    pub fn from_product(product: Product, quantity: i64) -> Self {
        CartLine {
            product,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The line total: `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Command
// =============================================================================

/// The four commands that drive the cart reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum CartCommand {
    /// Merge `quantity` into an existing line for `product.id`, or append a
    /// new line. Quantities clamp to `product.units_in_stock`.
    AddToCart { product: Product, quantity: i64 },

    /// Drop the matching line. No-op if absent.
    RemoveFromCart {
        #[serde(rename = "productId")]
        product_id: String,
    },

    /// Replace the line's quantity (clamped to stock). A quantity `<= 0`
    /// behaves as `RemoveFromCart`. No-op if absent.
    UpdateQuantity {
        #[serde(rename = "productId")]
        product_id: String,
        quantity: i64,
    },

    /// Reset to the empty cart.
    ClearCart,
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart: an insertion-ordered sequence of lines plus the derived total.
///
/// `total` is never mutated independently; every transition recomputes it
/// from the surviving lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,

    /// Sum of `unit_price × quantity` over all lines.
    pub total: Money,
}

impl CartState {
    /// The empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Applies a command, producing the next state.
    ///
    /// This is a total function: every `(state, command)` pair maps to a
    /// valid state, never an error.
    pub fn apply(self, command: CartCommand) -> CartState {
        match command {
            CartCommand::AddToCart { product, quantity } => self.add(product, quantity),
            CartCommand::RemoveFromCart { product_id } => self.remove(&product_id),
            CartCommand::UpdateQuantity {
                product_id,
                quantity,
            } => self.update_quantity(&product_id, quantity),
            CartCommand::ClearCart => CartState::default(),
        }
    }

    /// Checks if the cart has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Looks up a line by product id.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// The product snapshots currently carted, in display order.
    pub fn products(&self) -> Vec<Product> {
        self.lines.iter().map(|line| line.product.clone()).collect()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn add(mut self, product: Product, quantity: i64) -> CartState {
        // Non-positive adds carry no intent the cart can express; ignore.
        if quantity <= 0 {
            return self.recompute();
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = (line.quantity + quantity).min(line.product.units_in_stock);
            return self.recompute();
        }

        // A clamp against zero stock would create an empty line; skip instead.
        let quantity = quantity.min(product.units_in_stock);
        if quantity < 1 || self.lines.len() >= MAX_CART_LINES {
            return self.recompute();
        }

        self.lines.push(CartLine::from_product(product, quantity));
        self.recompute()
    }

    fn remove(mut self, product_id: &str) -> CartState {
        self.lines.retain(|line| line.product.id != product_id);
        self.recompute()
    }

    fn update_quantity(mut self, product_id: &str, quantity: i64) -> CartState {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            line.quantity = quantity.min(line.product.units_in_stock);
        }
        self.recompute()
    }

    fn recompute(mut self) -> CartState {
        self.total = self.lines.iter().map(CartLine::line_total).sum();
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
