//! Pagination module
//!
//! Cursor-based navigation over TAMS list endpoints.
//!
//! # Overview
//!
//! The state machine lives in [`PaginationState::apply`] and is pure, so it
//! can be tested without any I/O. [`CursorPaginator`] is the async shell
//! that performs requests through an injected [`Transport`](crate::transport::Transport),
//! reads `Link` and `X-Paging-*` headers, and normalizes the response body.
//!
//! ```text
//! Initial ──fetch_first──▶ Loading ──ok──▶ Loaded ──next/previous/refresh──▶ Loading
//!                             │
//!                             └──err──▶ Error ──fetch_first/refresh──▶ Loading
//! ```

mod page;
mod paginator;
mod types;

pub use page::{NormalizedPage, ResponseShape};
pub use paginator::CursorPaginator;
pub use types::{Event, Navigation, Page, PageMetadata, PaginationState, Phase};
