//! Transport module
//!
//! The fetch-like seam the paginator performs I/O through.
//!
//! # Features
//!
//! - **Injectable**: anything implementing [`Transport`], including plain
//!   async closures wrapped with [`transport_fn`]
//! - **HTTP**: [`HttpTransport`] sends GET requests with reqwest
//! - **No policy**: no retries or backoff; callers own that

mod http;
mod types;

pub use http::HttpTransport;
pub use types::{transport_fn, FnTransport, Transport, TransportRequest, TransportResponse};
