//! CLI module
//!
//! Command-line interface over the TAMS client.
//!
//! # Commands
//!
//! - `timerange` - Parse and canonicalize a timerange
//! - `query` - Build the query string for a filter set
//! - `links` - Parse a Link header
//! - `list` - Page through flows, sources or objects
//! - `service` - Show the service description

mod commands;
mod runner;

pub use commands::{Cli, Commands, FilterArgs, ListResource, OutputFormat};
pub use runner::Runner;

#[cfg(test)]
mod tests;
