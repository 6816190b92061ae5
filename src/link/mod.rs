//! Link header module
//!
//! Parses RFC 5988 `Link` headers into relation entries and pulls opaque
//! cursor tokens out of their URLs.
//!
//! # Overview
//!
//! Parsing is lenient: a malformed entry is logged and skipped so that
//! navigation keeps working with whatever the server (or a proxy in front
//! of it) got right. When a relation appears more than once, the last
//! entry wins.

mod parser;
mod types;

pub use parser::{extract_cursor, parse, CURSOR_PARAM};
pub use types::{LinkEntry, LinkHeader};

#[cfg(test)]
mod tests;
