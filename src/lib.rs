// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # TAMS Client
//!
//! Client-side contract layer for Time-Addressable Media Store (TAMS) APIs.
//!
//! ## Features
//!
//! - **Timeranges**: Parse, validate and canonicalize `"s:n_s:n"` strings
//! - **Query Building**: Deterministic, percent-encoded query strings from a [`query::FilterSet`]
//! - **Link Headers**: Lenient RFC 5988 parsing with opaque cursor extraction
//! - **Cursor Pagination**: A pure state machine plus an async paginator over an injected transport
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tams_client::client::{Resource, TamsClient};
//! use tams_client::{timerange, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = TamsClient::connect("https://tams.example.com/v6.0")?;
//!
//!     let filters = client
//!         .filters()
//!         .with_format("urn:x-nmos:format:video")
//!         .with_timerange(timerange::parse("0:0_3600:0")?);
//!
//!     let flows = client.paginator(Resource::Flows)?;
//!     let page = flows.fetch_first(filters).await?;
//!     let next = flows.fetch_next().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 TamsClient  /  tams-client CLI               │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │                       CursorPaginator                        │
//! │   fetch_first · fetch_next · fetch_previous · refresh · reset│
//! └───────┬──────────────────┬──────────────────┬────────────────┘
//!         │                  │                  │
//! ┌───────┴──────┐   ┌───────┴──────┐   ┌───────┴──────┐
//! │ QueryBuilder │   │  Link parser │   │  Transport   │
//! └───────┬──────┘   └──────────────┘   └──────────────┘
//!         │
//! ┌───────┴──────┐
//! │  Timerange   │
//! └──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Timerange parsing and serialization
pub mod timerange;

/// Link header parsing
pub mod link;

/// Filter sets and query strings
pub mod query;

/// Cursor pagination
pub mod pagination;

/// Injectable request transport
pub mod transport;

/// Endpoint-level client
pub mod client;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};

// Re-export commonly used types
pub use client::{Resource, TamsClient};
pub use pagination::{CursorPaginator, Navigation, Page, PaginationState, Phase};
pub use query::FilterSet;
pub use timerange::{Timerange, Timestamp};
pub use transport::{HttpTransport, Transport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
