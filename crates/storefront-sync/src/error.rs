//! # Sync Error Types
//!
//! What store callers and the checkout flow see when an operation fails.
//!
//! Stores additionally mirror remote-failure messages into their
//! snapshot's `error` field, so a subscriber can render the failure
//! without having been the caller. Validation failures never reach the
//! snapshot; they block submission before any request and go back to
//! the submitting caller only.

use thiserror::Error;

use storefront_client::ClientError;
use storefront_core::error::ValidationError;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors surfaced by the stores, the cart session, and checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Form input violated field rules; nothing was sent to the server.
    /// One human-readable message per violated rule.
    #[error("validation failed: {}", .messages.join("; "))]
    Validation { messages: Vec<String> },

    /// A boundary precondition refused the operation (unsellable product,
    /// empty cart at checkout). Nothing was sent to the server.
    #[error("{0}")]
    Rejected(String),

    /// The remote collection client failed; see [`ClientError`].
    #[error(transparent)]
    Remote(#[from] ClientError),
}

impl SyncError {
    /// Collects validation errors into the caller-facing variant.
    pub fn validation(errors: Vec<ValidationError>) -> Self {
        SyncError::Validation {
            messages: errors.iter().map(ToString::to_string).collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_joins_messages() {
        let err = SyncError::validation(vec![
            ValidationError::Required {
                field: "name".to_string(),
            },
            ValidationError::MustBePositive {
                field: "unit price".to_string(),
            },
        ]);

        let text = err.to_string();
        assert!(text.contains("name is required"));
        assert!(text.contains("unit price must be greater than 0"));
    }

    #[test]
    fn test_remote_is_transparent() {
        let err: SyncError = ClientError::Http { status: 500 }.into();
        assert_eq!(err.to_string(), "API error: 500");
    }
}
