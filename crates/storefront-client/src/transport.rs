//! # API Transport
//!
//! The HTTP seam between the collection clients and the backend.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Transport Flow                                   │
//! │                                                                         │
//! │  ProductClient / OrderClient                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiTransport::send(method, "products", body)                           │
//! │       │                                                                 │
//! │       ├── production: HttpTransport (reqwest, base URL + timeouts)      │
//! │       └── tests:      recording mock scripted per call                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2xx + JSON body      → Ok(Some(value))                                 │
//! │  2xx + empty/non-JSON → Ok(None)          (bare acknowledgement)        │
//! │  non-2xx              → Err(Http { status })                            │
//! │  connect/timeout/IO   → Err(Transport)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Paths are relative to the configured base URL and never start with `/`
//! (`"products"`, `"orders/5/pay"`, `"products?id=3"`).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Method
// =============================================================================

/// The HTTP methods the backend contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        write!(f, "{label}")
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// One status-checked request/response exchange with the backend.
///
/// The trait is the mock seam: tests substitute a scripted implementation
/// and assert on the calls that were (or were not) issued.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Sends one request and returns the parsed response body, if any.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<Option<Value>>;
}

// =============================================================================
// Body Decoding Helpers
// =============================================================================

/// Decodes a required response body into `T`.
pub(crate) fn decode<T: DeserializeOwned>(body: Option<Value>) -> ClientResult<T> {
    let value = body.ok_or_else(|| ClientError::Decode("response body was empty".to_string()))?;
    serde_json::from_value(value).map_err(|err| ClientError::Decode(err.to_string()))
}

/// Decodes an optional echo body into `T`, tolerating bare acknowledgements.
///
/// Update endpoints may answer with the updated entity or with an empty
/// ack; callers fall back to their own view when no echo is present.
pub(crate) fn decode_echo<T: DeserializeOwned>(body: Option<Value>) -> Option<T> {
    body.and_then(|value| serde_json::from_value(value).ok())
}

// =============================================================================
// HTTP Transport (reqwest)
// =============================================================================

/// Production transport backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Builds a transport from the resolved configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        Ok(HttpTransport { http, base_url })
    }

    /// Joins a relative entity path onto the base URL.
    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<Option<Value>> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "Sending API request");

        let mut request = match method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
            Method::Delete => self.http.delete(url),
        };

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(%method, %path, status = status.as_u16(), "API request rejected");
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        // Some ack responses carry non-JSON bodies; treat those as empty.
        Ok(serde_json::from_slice(&bytes).ok())
    }
}

// =============================================================================
// Recording Mock (test builds only)
// =============================================================================

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted transport for unit tests. Responses are consumed in FIFO
    //! order; every issued request is recorded for call-count assertions.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// A request the mock observed.
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: Method,
        pub path: String,
        pub body: Option<Value>,
    }

    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<ClientResult<Option<Value>>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues the next response to hand out.
        pub fn push_response(&self, response: ClientResult<Option<Value>>) {
            self.responses.lock().unwrap().push_back(response);
        }

        /// Number of requests that actually reached the transport.
        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        /// Every request observed, in order.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiTransport for MockTransport {
        async fn send(
            &self,
            method: Method,
            path: &str,
            body: Option<Value>,
        ) -> ClientResult<Option<Value>> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.to_string(),
                body,
            });

            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("MockTransport: no scripted response left for request")
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
