//! Transport trait and request/response types

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

/// A GET request against the TAMS API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Endpoint path, e.g. "/flows"
    pub path: String,
    /// Already-encoded query string without the leading `?`
    pub query: String,
}

impl TransportRequest {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Path with the query appended
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

/// A response as seen by the pagination layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Headers keyed by lowercased name; repeated headers are joined with ", "
    pub headers: BTreeMap<String, String>,
    /// Raw response body
    pub body: String,
}

impl TransportResponse {
    /// Create a response without headers
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// 200 response with a JSON body
    pub fn json(body: &Value) -> Self {
        Self::new(200, body.to_string())
    }

    /// Add a header, joining repeated names the way HTTP folds them
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.append_header(name, value);
        self
    }

    pub(crate) fn append_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.headers
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    /// Look up a header case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an error
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::http_status(self.status, self.body))
        }
    }
}

/// Performs requests for the pagination layer
///
/// Implementations own their timeout policy. Non-2xx statuses are returned
/// as responses; the caller decides what counts as failure.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        (**self).send(request).await
    }
}

/// Adapter that turns an async closure into a [`Transport`]
#[derive(Clone)]
pub struct FnTransport<F> {
    f: F,
}

/// Wrap an async closure as a transport
///
/// ```
/// use tams_client::transport::{transport_fn, TransportResponse};
///
/// let transport = transport_fn(|_request| async {
///     Ok(TransportResponse::new(200, "[]"))
/// });
/// # let _ = transport;
/// ```
pub fn transport_fn<F, Fut>(f: F) -> FnTransport<F>
where
    F: Fn(TransportRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TransportResponse>> + Send,
{
    FnTransport { f }
}

#[async_trait]
impl<F, Fut> Transport for FnTransport<F>
where
    F: Fn(TransportRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TransportResponse>> + Send,
{
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        (self.f)(request).await
    }
}

impl<F> std::fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}
