//! TAMS client
//!
//! Bundles a transport with the TAMS endpoints and hands out one
//! [`CursorPaginator`](crate::pagination::CursorPaginator) per query.
//!
//! # Example
//!
//! ```rust,ignore
//! use tams_client::client::{Resource, TamsClient};
//!
//! let client = TamsClient::connect("https://tams.example.com/v6.0")?;
//! let flows = client.paginator(Resource::Flows)?;
//! let page = flows.fetch_first(client.filters().with_label("camera-1")).await?;
//! ```

mod tams;
mod types;

pub use tams::TamsClient;
pub use types::Resource;
