//! # Validation Module
//!
//! Input validation for product and order form data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (form components)                                │
//! │  ├── Immediate per-field feedback while typing                          │
//! │  └── Renders the message lists produced here                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any network call)                         │
//! │  ├── validate_product / validate_order collect every violation          │
//! │  └── A non-empty list blocks submission entirely                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend service (authoritative)                               │
//! │  └── Rejections surface as RemoteFailure, not validation                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators that check a whole draft return `Vec<ValidationError>`:
//! every violation at once, so a form can flag all bad fields in one pass.
//! Single-field helpers return `ValidationResult<()>`.

use crate::error::{ValidationError, ValidationResult};
use crate::types::{OrderDraft, ProductDraft};

/// Maximum length accepted for a product name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length accepted for a catalog search query.
pub const MAX_QUERY_LENGTH: usize = 100;

// =============================================================================
// Draft Validators
// =============================================================================

/// Validates a product draft before create/update submission.
///
/// ## Rules
/// - `name` must be non-empty (after trimming) and at most 200 characters
/// - `unit_price` must be greater than zero
/// - `units_in_stock` must be zero or greater
///
/// ## Returns
/// Every violation found; an empty vector means the draft is submittable.
pub fn validate_product(draft: &ProductDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(err) = validate_product_name(&draft.name) {
        errors.push(err);
    }

    if !draft.unit_price.is_positive() {
        errors.push(ValidationError::MustBePositive {
            field: "unit price".to_string(),
        });
    }

    if draft.units_in_stock < 0 {
        errors.push(ValidationError::MustBeNonNegative {
            field: "units in stock".to_string(),
        });
    }

    errors
}

/// Validates an order draft before submission.
///
/// ## Rules
/// - `products` must contain at least one snapshot
///
/// The payment method is an enum and cannot be absent by construction, so
/// "payment method is required" holds by the type system.
pub fn validate_order(draft: &OrderDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.products.is_empty() {
        errors.push(ValidationError::EmptyCollection {
            field: "product".to_string(),
        });
    }

    errors
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// An empty query is allowed (matches everything). Returns the trimmed
/// query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > MAX_QUERY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LENGTH,
        });
    }

    Ok(query.to_string())
}

/// Validates a cart quantity before dispatching an add.
///
/// The reducer clamps regardless; this is for form feedback ahead of the
/// dispatch.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
