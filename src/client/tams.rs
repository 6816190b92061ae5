//! TAMS client implementation

use super::types::Resource;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{CursorPaginator, Navigation, Page};
use crate::query::{FilterSet, DEFAULT_LIMIT};
use crate::transport::{HttpTransport, Transport, TransportRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for reading from a TAMS endpoint
///
/// The transport is shared by every paginator the client creates.
/// Paginators themselves share nothing.
pub struct TamsClient<T> {
    transport: Arc<T>,
    default_limit: u32,
}

impl TamsClient<HttpTransport> {
    /// Create a client over HTTP from a config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(config)?;
        Ok(Self::new(transport).with_default_limit(config.default_limit))
    }

    /// Create a client over HTTP with default settings
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::from_config(&ClientConfig::new(base_url))
    }
}

impl<T: Transport> TamsClient<T> {
    /// Create a client over any transport
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Set the page size used by [`filters`](Self::filters)
    #[must_use]
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    /// Empty filter set carrying the client's default page size
    pub fn filters(&self) -> FilterSet {
        FilterSet::new().with_limit(self.default_limit)
    }

    /// Create a paginator for a list endpoint
    pub fn paginator(&self, resource: Resource) -> Result<CursorPaginator<Arc<T>>> {
        if !resource.is_paginated() {
            return Err(Error::validation(
                "resource",
                format!("{resource} is not a list endpoint"),
            ));
        }
        Ok(CursorPaginator::new(
            Arc::clone(&self.transport),
            resource.path(),
        ))
    }

    /// Read `GET /service`
    pub async fn service(&self) -> Result<Value> {
        let request = TransportRequest::new(Resource::Service.path(), "");
        let response = self.transport.send(request).await?.error_for_status()?;

        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| Error::unexpected_format(format!("service body is not JSON: {e}")))?;
        if !value.is_object() {
            return Err(Error::unexpected_format(
                "expected a JSON object from /service",
            ));
        }
        Ok(value)
    }

    /// Walk forward through a list endpoint, returning up to `max_pages` pages
    ///
    /// The first page is always fetched. Each page carries the pagination
    /// state right after it loaded.
    pub async fn pages(
        &self,
        resource: Resource,
        filters: FilterSet,
        max_pages: usize,
    ) -> Result<Vec<Page>> {
        let paginator = self.paginator(resource)?;
        let mut pages = Vec::new();

        let mut navigation = paginator.fetch_first(filters).await?;
        while let Navigation::Fetched(page) = navigation {
            debug!(%resource, page = pages.len() + 1, items = page.items().len(), "Page loaded");
            let more = page.state.can_go_next();
            pages.push(page);

            if pages.len() >= max_pages || !more {
                break;
            }
            navigation = paginator.fetch_next().await?;
        }

        info!(%resource, pages = pages.len(), "Listing complete");
        Ok(pages)
    }

    /// Entities of up to `max_pages` pages, in order
    pub async fn collect(
        &self,
        resource: Resource,
        filters: FilterSet,
        max_pages: usize,
    ) -> Result<Vec<Value>> {
        let pages = self.pages(resource, filters, max_pages).await?;
        Ok(pages
            .into_iter()
            .flat_map(|page| page.content.items)
            .collect())
    }
}

impl<T> Clone for TamsClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            default_limit: self.default_limit,
        }
    }
}

impl<T> std::fmt::Debug for TamsClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TamsClient")
            .field("default_limit", &self.default_limit)
            .finish_non_exhaustive()
    }
}
