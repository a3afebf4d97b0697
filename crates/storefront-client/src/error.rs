//! # Client Error Types
//!
//! Error types for remote collection operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Remote         │  │  Local Guard    │  │  Configuration          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Http {status}  │  │  NotFoundLocally│  │  InvalidUrl             │ │
//! │  │  Transport      │  │  (no request    │  │  ConfigLoadFailed       │ │
//! │  │  Decode         │  │   is issued)    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A non-2xx response is surfaced as `Http` carrying only the status code;
//! no structured error body is parsed.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by the remote collection clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("API error: {status}")]
    Http { status: u16 },

    /// The request never completed (connect failure, timeout, IO).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Mutation guard: the entity is absent from the local cache, so no
    /// request was issued.
    #[error("{entity} not found: {id}")]
    NotFoundLocally { entity: String, id: String },

    /// The configured base URL does not parse.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The config file exists but could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

impl ClientError {
    /// Creates the local-guard error for a missing cache entry.
    pub fn not_found_locally(entity: &str, id: &str) -> Self {
        ClientError::NotFoundLocally {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Returns true when the server reported 404 for the request.
    ///
    /// `fetch_by_id` uses this to map a missing entity to `Ok(None)`
    /// instead of an error.
    pub fn is_http_not_found(&self) -> bool {
        matches!(self, ClientError::Http { status: 404 })
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport(format!("timed out: {err}"))
        } else if err.is_connect() {
            ClientError::Transport(format!("connect failed: {err}"))
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
