//! Pagination state and transitions
//!
//! [`PaginationState::apply`] is a pure function of the current state and an
//! [`Event`]; the async paginator only performs I/O and feeds it events.

use super::page::NormalizedPage;
use crate::link;
use crate::query::DEFAULT_LIMIT;
use crate::transport::TransportResponse;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle phase of a paginator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing fetched yet
    #[default]
    Initial,
    /// A request is in flight
    Loading,
    /// The last request succeeded
    Loaded,
    /// The last request failed; earlier results are still available
    Error,
}

/// Navigation state of one paginator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Cursor of the page currently shown; `None` for the first page
    pub current_cursor: Option<String>,
    /// Cursors visited before the current one, oldest first
    pub history: Vec<Option<String>>,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
    pub first_cursor: Option<String>,
    pub last_cursor: Option<String>,
    /// Page size reported by the server, or the requested one
    pub limit: u32,
    /// Total entity count, when the server reports one
    pub total_count: Option<u64>,
    /// Raw `X-Paging-NextKey`
    pub next_key: Option<String>,
    /// Raw `X-Paging-Timerange`
    pub paging_timerange: Option<String>,
    pub phase: Phase,
    /// Position before an in-flight next/previous move, restored if it fails
    #[serde(skip)]
    rollback: Option<Checkpoint>,
}

/// Cursor and history saved before a move
#[derive(Debug, Clone, PartialEq, Eq)]
struct Checkpoint {
    current_cursor: Option<String>,
    history: Vec<Option<String>>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl PaginationState {
    /// Create a fresh state
    pub fn new(limit: u32) -> Self {
        Self {
            current_cursor: None,
            history: Vec::new(),
            next_cursor: None,
            prev_cursor: None,
            first_cursor: None,
            last_cursor: None,
            limit,
            total_count: None,
            next_key: None,
            paging_timerange: None,
            phase: Phase::Initial,
            rollback: None,
        }
    }

    /// Apply an event, returning the next state
    ///
    /// Events that make no sense in the current phase leave the state as is.
    /// A failed next/previous move puts the cursor and history back where
    /// they were, so the state keeps describing the page last loaded.
    #[must_use]
    pub fn apply(mut self, event: Event) -> Self {
        match event {
            Event::FirstRequested { limit } if self.phase != Phase::Loading => {
                self.rollback = None;
                self.history.clear();
                self.current_cursor = None;
                self.limit = limit;
                self.phase = Phase::Loading;
            }
            Event::NextRequested if self.can_go_next() => {
                self.rollback = Some(self.checkpoint());
                let next = self.next_cursor.clone();
                self.history.push(self.current_cursor.take());
                self.current_cursor = next;
                self.phase = Phase::Loading;
            }
            Event::PreviousRequested if self.can_go_previous() => {
                self.rollback = Some(self.checkpoint());
                self.current_cursor = self.history.pop().flatten();
                self.phase = Phase::Loading;
            }
            Event::RefreshRequested if matches!(self.phase, Phase::Loaded | Phase::Error) => {
                self.rollback = None;
                self.phase = Phase::Loading;
            }
            Event::PageLoaded(metadata) if self.phase == Phase::Loading => {
                self.rollback = None;
                self.next_cursor = metadata.next_cursor;
                self.prev_cursor = metadata.prev_cursor;
                self.first_cursor = metadata.first_cursor;
                self.last_cursor = metadata.last_cursor;
                if let Some(limit) = metadata.limit {
                    self.limit = limit;
                }
                self.total_count = metadata.total_count;
                self.next_key = metadata.next_key;
                self.paging_timerange = metadata.paging_timerange;
                self.phase = Phase::Loaded;
            }
            Event::RequestFailed if self.phase == Phase::Loading => {
                if let Some(checkpoint) = self.rollback.take() {
                    self.current_cursor = checkpoint.current_cursor;
                    self.history = checkpoint.history;
                }
                self.phase = Phase::Error;
            }
            Event::Reset { limit } => return Self::new(limit),
            ignored => debug!(event = ?ignored, phase = ?self.phase, "Ignoring event"),
        }
        self
    }

    /// A next page is known and nothing is in flight
    pub fn can_go_next(&self) -> bool {
        self.phase == Phase::Loaded && self.next_cursor.is_some()
    }

    /// There is history to go back to and nothing is in flight
    pub fn can_go_previous(&self) -> bool {
        self.phase == Phase::Loaded && !self.history.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// One-based position of the current page
    pub fn page_number(&self) -> usize {
        self.history.len() + 1
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            current_cursor: self.current_cursor.clone(),
            history: self.history.clone(),
        }
    }
}

/// Inputs to the pagination state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `fetch_first` started with this page size
    FirstRequested { limit: u32 },
    NextRequested,
    PreviousRequested,
    RefreshRequested,
    /// A request succeeded
    PageLoaded(PageMetadata),
    /// A request failed; a next/previous move is undone
    RequestFailed,
    /// Start over as a fresh paginator
    Reset { limit: u32 },
}

/// Pagination fields taken from one response's headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
    pub first_cursor: Option<String>,
    pub last_cursor: Option<String>,
    pub limit: Option<u32>,
    pub total_count: Option<u64>,
    pub next_key: Option<String>,
    pub paging_timerange: Option<String>,
}

impl PageMetadata {
    /// Extract `Link` and `X-Paging-*` metadata from a response
    ///
    /// When there is no `next` link, `X-Paging-NextKey` stands in as the
    /// next cursor.
    pub fn from_response(response: &TransportResponse) -> Self {
        let links = response.header("link").map(link::parse).unwrap_or_default();
        let next_key = non_empty(response.header("x-paging-nextkey"));

        Self {
            next_cursor: links.cursor("next").or_else(|| next_key.clone()),
            prev_cursor: links.cursor("prev"),
            first_cursor: links.cursor("first"),
            last_cursor: links.cursor("last"),
            limit: parse_header(response, "x-paging-limit").filter(|limit| *limit > 0),
            total_count: parse_header(response, "x-paging-count"),
            next_key,
            paging_timerange: non_empty(response.header("x-paging-timerange")),
        }
    }
}

/// One page of results with the state right after it loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub content: NormalizedPage,
    pub state: PaginationState,
}

impl Page {
    /// Entities on this page
    pub fn items(&self) -> &[serde_json::Value] {
        &self.content.items
    }
}

/// Outcome of a navigation call
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// A request was made and its page loaded
    Fetched(Page),
    /// Nothing to do; no request was made
    Unchanged(PaginationState),
    /// The paginator was reset while the request was in flight
    Discarded,
}

impl Navigation {
    /// The fetched page, if any
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Fetched(page) => Some(page),
            _ => None,
        }
    }

    /// State after the call; `None` for discarded results
    pub fn state(&self) -> Option<&PaginationState> {
        match self {
            Self::Fetched(page) => Some(&page.state),
            Self::Unchanged(state) => Some(state),
            Self::Discarded => None,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn parse_header<T: std::str::FromStr>(response: &TransportResponse, name: &str) -> Option<T> {
    let raw = response.header(name)?.trim();
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        debug!(header = name, value = raw, "Ignoring non-numeric paging header");
    }
    parsed
}
