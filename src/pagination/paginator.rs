//! Cursor paginator
//!
//! Async shell around [`PaginationState`]: it turns navigation calls into
//! events, performs the request and feeds the outcome back.

use super::page::NormalizedPage;
use super::types::{Event, Navigation, Page, PageMetadata, PaginationState, Phase};
use crate::error::{Error, Result};
use crate::query::{self, FilterSet};
use crate::transport::{Transport, TransportRequest};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Per-query cursor paginator
///
/// At most one navigation can be in flight. A second call made while the
/// phase is [`Phase::Loading`] fails with [`Error::ConcurrentOperation`]
/// and leaves the state alone.
///
/// # Example
///
/// ```rust,ignore
/// let paginator = CursorPaginator::new(transport, "/flows");
/// let first = paginator.fetch_first(FilterSet::new().with_limit(10)).await?;
/// let second = paginator.fetch_next().await?;
/// ```
pub struct CursorPaginator<T> {
    transport: T,
    path: String,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    state: PaginationState,
    filters: Option<FilterSet>,
    page: Option<NormalizedPage>,
    /// Bumped by `reset` so late responses can be told apart
    generation: u64,
}

impl<T: Transport> CursorPaginator<T> {
    /// Create a paginator for an endpoint path such as "/flows"
    pub fn new(transport: T, path: impl Into<String>) -> Self {
        Self {
            transport,
            path: path.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Endpoint path this paginator queries
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PaginationState {
        self.lock().state.clone()
    }

    /// Last successfully loaded page
    pub fn current_page(&self) -> Option<NormalizedPage> {
        self.lock().page.clone()
    }

    /// Filters in use
    pub fn filters(&self) -> Option<FilterSet> {
        self.lock().filters.clone()
    }

    /// Fetch the first page for a filter set
    ///
    /// Clears the history and ignores any cursor in `filters`.
    pub async fn fetch_first(&self, filters: FilterSet) -> Result<Navigation> {
        let (request, generation) = {
            let mut inner = self.lock();
            if inner.state.is_loading() {
                return Err(Error::concurrent("fetch the first page"));
            }
            let filters = filters.at_cursor(None);
            let query = query::build(&filters)?;

            inner.state = std::mem::take(&mut inner.state).apply(Event::FirstRequested {
                limit: filters.limit,
            });
            inner.filters = Some(filters);
            (TransportRequest::new(&self.path, query), inner.generation)
        };

        self.execute(request, generation).await
    }

    /// Move to the next page
    ///
    /// A no-op when there is no next cursor.
    pub async fn fetch_next(&self) -> Result<Navigation> {
        self.navigate(Event::NextRequested, "fetch the next page")
            .await
    }

    /// Move back to the previously visited page
    ///
    /// A no-op when the history is empty.
    pub async fn fetch_previous(&self) -> Result<Navigation> {
        self.navigate(Event::PreviousRequested, "fetch the previous page")
            .await
    }

    /// Fetch the current page again without touching the history
    pub async fn refresh_current(&self) -> Result<Navigation> {
        self.navigate(Event::RefreshRequested, "refresh the current page")
            .await
    }

    /// Start over as a fresh paginator for new filters
    ///
    /// A request still in flight completes, but its result is dropped.
    /// Invalid filters are rejected and leave the paginator untouched.
    pub fn reset(&self, filters: FilterSet) -> Result<()> {
        filters.validate()?;

        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = std::mem::take(&mut inner.state).apply(Event::Reset {
            limit: filters.limit,
        });
        inner.filters = Some(filters);
        inner.page = None;
        debug!(path = %self.path, "Paginator reset");
        Ok(())
    }

    async fn navigate(&self, event: Event, operation: &'static str) -> Result<Navigation> {
        let (request, generation) = {
            let mut inner = self.lock();
            if inner.state.is_loading() {
                return Err(Error::concurrent(operation));
            }

            let next = inner.state.clone().apply(event);
            if !next.is_loading() {
                debug!(path = %self.path, operation, "Nothing to do");
                return Ok(Navigation::Unchanged(inner.state.clone()));
            }

            let Some(filters) = inner.filters.as_ref() else {
                return Ok(Navigation::Unchanged(inner.state.clone()));
            };
            let query = query::build(&filters.at_cursor(next.current_cursor.clone()))?;

            inner.state = next;
            (TransportRequest::new(&self.path, query), inner.generation)
        };

        self.execute(request, generation).await
    }

    async fn execute(&self, request: TransportRequest, generation: u64) -> Result<Navigation> {
        debug!(path = %request.path, query = %request.query, "Fetching page");
        let outcome = self.fetch(request).await;

        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(path = %self.path, "Discarding response for a reset paginator");
            return Ok(Navigation::Discarded);
        }

        match outcome {
            Ok((content, metadata)) => {
                inner.state = std::mem::take(&mut inner.state).apply(Event::PageLoaded(metadata));
                inner.page = Some(content.clone());
                Ok(Navigation::Fetched(Page {
                    content,
                    state: inner.state.clone(),
                }))
            }
            Err(e) => {
                warn!(path = %self.path, error = %e, "Page fetch failed");
                inner.state = std::mem::take(&mut inner.state).apply(Event::RequestFailed);
                Err(e)
            }
        }
    }

    async fn fetch(&self, request: TransportRequest) -> Result<(NormalizedPage, PageMetadata)> {
        let response = self.transport.send(request).await?.error_for_status()?;
        let metadata = PageMetadata::from_response(&response);
        let content = NormalizedPage::from_body(&response.body)?;
        Ok((content, metadata))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> std::fmt::Debug for CursorPaginator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase: Phase = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .phase;
        f.debug_struct("CursorPaginator")
            .field("path", &self.path)
            .field("phase", &phase)
            .finish_non_exhaustive()
    }
}
