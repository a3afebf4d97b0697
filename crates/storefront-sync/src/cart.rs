//! # Cart Session
//!
//! Process-wide (per page-load) holder of cart state.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartSession                                     │
//! │                                                                         │
//! │  add_to_cart ──► sellable guard ──► reducer AddToCart ──► notify        │
//! │                  (inactive or out-of-stock products are refused         │
//! │                   HERE; the reducer does not re-check)                  │
//! │                                                                         │
//! │  update_quantity / remove_from_cart / clear ──► reducer ──► notify      │
//! │                                                                         │
//! │  subscribe() ──► watch::Receiver<CartState>                             │
//! │                  (cart badge, line list, total display)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session starts empty and lives for one page load; clearing happens
//! on explicit request or on successful checkout. State is process-local
//! and lost on reload; there is no persistence.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use storefront_core::cart::{CartCommand, CartState};
use storefront_core::types::Product;

use crate::error::{SyncError, SyncResult};

/// Holder of the cart state for one page session.
pub struct CartSession {
    /// Client-local session identity (never sent to the backend).
    id: Uuid,

    /// When the session started.
    created_at: DateTime<Utc>,

    tx: watch::Sender<CartState>,
}

impl CartSession {
    /// Starts a new, empty session.
    pub fn new() -> Self {
        CartSession {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            tx: watch::channel(CartState::default()).0,
        }
    }

    /// The session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the session started.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Subscribes to cart changes. The receiver immediately sees the
    /// current state.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.tx.subscribe()
    }

    /// The current cart state.
    pub fn snapshot(&self) -> CartState {
        self.tx.borrow().clone()
    }

    /// Adds a product to the cart.
    ///
    /// ## Boundary Guard
    /// Refuses products that are inactive or out of stock, the
    /// precondition the reducer deliberately leaves to its caller.
    /// Quantities beyond stock are the reducer's job and clamp silently.
    pub fn add_to_cart(&self, product: &Product, quantity: i64) -> SyncResult<()> {
        if !product.sellable() {
            debug!(id = %product.id, "Refusing unsellable product");
            return Err(SyncError::Rejected(format!(
                "{} is not available for sale",
                product.name
            )));
        }

        self.dispatch(CartCommand::AddToCart {
            product: product.clone(),
            quantity,
        });
        Ok(())
    }

    /// Removes a line by product id. No-op if absent.
    pub fn remove_from_cart(&self, product_id: &str) {
        self.dispatch(CartCommand::RemoveFromCart {
            product_id: product_id.to_string(),
        });
    }

    /// Replaces a line's quantity; `<= 0` removes the line.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) {
        self.dispatch(CartCommand::UpdateQuantity {
            product_id: product_id.to_string(),
            quantity,
        });
    }

    /// Empties the cart.
    pub fn clear(&self) {
        self.dispatch(CartCommand::ClearCart);
    }

    /// Runs one command through the reducer and notifies subscribers.
    fn dispatch(&self, command: CartCommand) {
        self.tx.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.apply(command);
        });
    }
}

impl Default for CartSession {
    fn default() -> Self {
        CartSession::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::money::Money;

    fn product(id: &str, stock: i64, active: bool) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            unit_price: Money::from_cents(500),
            units_in_stock: stock,
            is_active: active,
        }
    }

    #[test]
    fn test_starts_empty() {
        let session = CartSession::new();
        let state = session.snapshot();
        assert!(state.is_empty());
        assert_eq!(state.total, Money::zero());
    }

    #[test]
    fn test_add_and_total() {
        let session = CartSession::new();
        session.add_to_cart(&product("1", 10, true), 2).unwrap();

        let state = session.snapshot();
        assert_eq!(state.line_count(), 1);
        assert_eq!(state.total, Money::from_cents(1000));
    }

    #[test]
    fn test_refuses_inactive_product() {
        let session = CartSession::new();

        let err = session
            .add_to_cart(&product("1", 10, false), 1)
            .unwrap_err();

        assert!(err.to_string().contains("not available"));
        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn test_refuses_out_of_stock_product() {
        let session = CartSession::new();

        assert!(session.add_to_cart(&product("1", 0, true), 1).is_err());
        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn test_update_and_remove_round_trip() {
        let session = CartSession::new();
        session.add_to_cart(&product("1", 10, true), 1).unwrap();

        session.update_quantity("1", 4);
        assert_eq!(session.snapshot().line("1").unwrap().quantity, 4);

        session.update_quantity("1", 0);
        assert!(session.snapshot().is_empty());

        session.add_to_cart(&product("1", 10, true), 1).unwrap();
        session.remove_from_cart("1");
        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn test_clear_resets() {
        let session = CartSession::new();
        session.add_to_cart(&product("1", 10, true), 2).unwrap();
        session.add_to_cart(&product("2", 10, true), 1).unwrap();

        session.clear();

        let state = session.snapshot();
        assert!(state.is_empty());
        assert_eq!(state.total, Money::zero());
    }

    #[tokio::test]
    async fn test_subscribers_notified_on_change() {
        let session = CartSession::new();
        let mut rx = session.subscribe();
        rx.borrow_and_update();

        session.add_to_cart(&product("1", 10, true), 1).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().line_count(), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let a = CartSession::new();
        let b = CartSession::new();
        assert_ne!(a.id(), b.id());

        a.add_to_cart(&product("1", 10, true), 1).unwrap();
        assert!(b.snapshot().is_empty());
    }
}
