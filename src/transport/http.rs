//! reqwest-backed transport
//!
//! Sends plain GET requests. There are no retries here; a failed request
//! surfaces as an error and the caller decides what to do next.

use super::types::{Transport, TransportRequest, TransportResponse};
use crate::config::ClientConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// HTTP transport for a single TAMS endpoint
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    default_headers: HashMap<String, String>,
}

impl HttpTransport {
    /// Create a transport with default settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(&ClientConfig::new(base_url))
    }

    /// Create a transport from a client config
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            default_headers: config.headers.clone(),
        })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for a request, keeping any base path prefix
    pub fn build_url(&self, request: &TransportRequest) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        let path = request.path.trim_start_matches('/');
        url.set_path(&format!("{base_path}/{path}"));
        url.set_query((!request.query.is_empty()).then_some(request.query.as_str()));
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = self.build_url(&request);
        debug!(%url, "GET");

        let mut req = self.client.get(url.clone());
        for (key, value) in &self.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        debug!(%url, status, bytes = body.len(), "Response received");
        Ok(into_response(status, &headers, body))
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("default_headers", &self.default_headers.len())
            .finish_non_exhaustive()
    }
}

fn into_response(status: u16, headers: &HeaderMap, body: String) -> TransportResponse {
    let mut response = TransportResponse::new(status, body);
    for (name, value) in headers {
        match value.to_str() {
            Ok(value) => response.append_header(name.as_str(), value),
            Err(_) => debug!(header = %name, "Skipping non-ASCII header value"),
        }
    }
    response
}
