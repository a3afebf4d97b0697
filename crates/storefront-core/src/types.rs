//! # Domain Types
//!
//! Core domain types shared across the storefront engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │      Fee        │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (opaque)    │   │  id (opaque)    │   │  name           │       │
//! │  │  name           │   │  amount?        │   │  amount         │       │
//! │  │  unit_price     │   │  order_status   │   └─────────────────┘       │
//! │  │  units_in_stock │   │  products[]     │                             │
//! │  │  is_active      │   │  fees[]         │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  OrderStatus    │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Pending, Paid  │   │  Card           │                             │
//! │  │  Cancelled, ... │   │  Transfer, Cash │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Entity ids are **server-assigned opaque strings**. The engine never mints
//! or parses them; it only compares them for equality.
//!
//! ## Wire Contract
//! Every DTO here round-trips through the backend's camelCase JSON
//! (`unitPrice`, `unitsInStock`, `isActive`, `paymentMethod`, ...).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (server-assigned, opaque).
    pub id: String,

    /// Display name shown in the catalog and on order snapshots.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub unit_price: Money,

    /// Current stock level. Non-negative.
    pub units_in_stock: i64,

    /// Whether the product is available for sale (soft delete).
    pub is_active: bool,
}

impl Product {
    /// Checks if the product can be added to a cart.
    ///
    /// A product with zero stock or an inactive flag must be refused at the
    /// cart boundary; the cart reducer itself does not re-check this.
    #[inline]
    pub fn sellable(&self) -> bool {
        self.is_active && self.units_in_stock > 0
    }

    /// Checks if the stock level is at or below the low-stock warning cutoff.
    #[inline]
    pub fn low_stock(&self) -> bool {
        self.units_in_stock <= LOW_STOCK_THRESHOLD
    }
}

/// Product payload without a server-assigned id.
///
/// Used as the creation body (`POST /products`), the update body
/// (`PUT /products?id={id}`), and the form-data shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub unit_price: Money,
    pub units_in_stock: i64,
    pub is_active: bool,
}

impl ProductDraft {
    /// Attaches an id to the draft, producing a full Product.
    ///
    /// The client-side cache uses this when the server acknowledges an
    /// update without echoing the entity back.
    pub fn with_id(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            unit_price: self.unit_price,
            units_in_stock: self.units_in_stock,
            is_active: self.is_active,
        }
    }
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> Self {
        ProductDraft {
            name: product.name,
            unit_price: product.unit_price,
            units_in_stock: product.units_in_stock,
            is_active: product.is_active,
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of a payment order.
///
/// Transitions are server-driven; the client only requests Pay/Cancel/Delete
/// and mirrors whatever status the server returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    /// Created, awaiting payment.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Cancelled by the buyer or the backend.
    Cancelled,
    /// Payment accepted, order being prepared.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the buyer.
    Delivered,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        };
        write!(f, "{label}")
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the buyer pays for an order. Chosen at order creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// Bank transfer.
    Transfer,
    /// Cash on delivery.
    Cash,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Cash => "Cash",
        };
        write!(f, "{label}")
    }
}

// =============================================================================
// Fee
// =============================================================================

/// A named charge attached to an order by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Fee {
    pub name: String,
    pub amount: Money,
}

// =============================================================================
// Order
// =============================================================================

/// A payment order.
///
/// `products` holds **snapshots** captured at order-creation time, not live
/// references to catalog entries; later catalog edits never rewrite an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Unique identifier (server-assigned, opaque).
    pub id: String,

    /// Total charged amount. Absent while the backend is still computing it
    /// (a "pending calculation" state, not zero).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Payment method chosen at creation.
    pub payment_method: PaymentMethod,

    /// Payment provider assigned by the backend. Absent until assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,

    /// The provider's own order reference. Absent until assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_order_id: Option<String>,

    /// Current lifecycle status.
    pub order_status: OrderStatus,

    /// Named charges added by the backend.
    pub fees: Vec<Fee>,

    /// Product snapshots captured at creation time.
    pub products: Vec<Product>,
}

/// Order-creation payload: the distinct product snapshots plus the chosen
/// payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDraft {
    pub products: Vec<Product>,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(stock: i64, active: bool) -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Test Product".to_string(),
            unit_price: Money::from_cents(100),
            units_in_stock: stock,
            is_active: active,
        }
    }

    #[test]
    fn test_sellable() {
        assert!(product(3, true).sellable());
        assert!(!product(0, true).sellable());
        assert!(!product(3, false).sellable());
    }

    #[test]
    fn test_low_stock() {
        assert!(product(5, true).low_stock());
        assert!(product(0, true).low_stock());
        assert!(!product(6, true).low_stock());
    }

    #[test]
    fn test_product_wire_format_is_camel_case() {
        let value = serde_json::to_value(product(3, true)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "p-1",
                "name": "Test Product",
                "unitPrice": 100,
                "unitsInStock": 3,
                "isActive": true,
            })
        );
    }

    #[test]
    fn test_order_status_wire_strings() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"Pending\""
        );
        let status: OrderStatus = serde_json::from_str("\"Delivered\"").unwrap();
        assert_eq!(status, OrderStatus::Delivered);
    }

    #[test]
    fn test_order_optional_fields_absent_until_assigned() {
        let order = Order {
            id: "o-1".to_string(),
            amount: None,
            payment_method: PaymentMethod::Card,
            provider_name: None,
            provider_order_id: None,
            order_status: OrderStatus::Pending,
            fees: vec![],
            products: vec![product(1, true)],
        };

        let value = serde_json::to_value(&order).unwrap();
        assert!(value.get("amount").is_none());
        assert!(value.get("providerName").is_none());
        assert!(value.get("providerOrderId").is_none());
        assert_eq!(value["orderStatus"], json!("Pending"));
    }

    #[test]
    fn test_order_deserializes_with_missing_optionals() {
        let order: Order = serde_json::from_value(json!({
            "id": "o-2",
            "paymentMethod": "Transfer",
            "orderStatus": "Processing",
            "fees": [{"name": "Shipping", "amount": 499}],
            "products": [],
        }))
        .unwrap();

        assert_eq!(order.amount, None);
        assert_eq!(order.payment_method, PaymentMethod::Transfer);
        assert_eq!(order.fees[0].amount, Money::from_cents(499));
    }

    #[test]
    fn test_draft_with_id_round_trip() {
        let original = product(7, true);
        let draft: ProductDraft = original.clone().into();
        assert_eq!(draft.clone().with_id("p-1"), original);
    }
}
