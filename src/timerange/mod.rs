//! Timerange module
//!
//! Canonical timerange encoding used to filter every media-entity query.
//!
//! # Format
//!
//! ```text
//! [start_sec]:[start_nanos]_[end_sec]:[end_nanos]
//! ```
//!
//! A leading `_` leaves the start unbounded, nothing after the `_` leaves
//! the end unbounded, and the empty string matches everything.

mod codec;
mod types;

pub use codec::{canonical_form, parse, serialize};
pub use types::{Timerange, Timestamp, NANOS_PER_SECOND};

#[cfg(test)]
mod tests;
