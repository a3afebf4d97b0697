//! # Error Types
//!
//! Validation error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  storefront-client errors (separate crate)                              │
//! │  └── ClientError      - Transport/HTTP/local-cache failures             │
//! │                                                                         │
//! │  storefront-sync errors (separate crate)                                │
//! │  └── SyncError        - What store subscribers and callers see          │
//! │                                                                         │
//! │  Flow: ValidationError → SyncError → caller / snapshot.error            │
//! │        ClientError     → SyncError → caller / snapshot.error            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never bare strings
//! 4. Each variant's `Display` is a user-facing message; form validation
//!    collects those messages into lists

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input doesn't meet field rules. They are collected
/// client-side and block submission before any network call happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must be 0 or greater")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A collection that must not be empty is empty.
    #[error("at least one {field} is required")]
    EmptyCollection { field: String },
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
