//! Query builder module
//!
//! Turns a [`FilterSet`] into the canonical query string sent with every
//! media-entity request.
//!
//! # Overview
//!
//! Parameters are sorted by name and percent-encoded per RFC 3986, so the
//! same logical filters always produce byte-identical strings. That keeps
//! request caches and test fixtures stable.

mod builder;
mod types;

pub use builder::{build, encode_component, parse_query, query_pairs};
pub use types::{FilterSet, DEFAULT_LIMIT};
