//! CLI commands and argument parsing

use crate::client::Resource;
use crate::error::{Error, Result, ResultExt};
use crate::query::FilterSet;
use crate::timerange::Timerange;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for a Time-Addressable Media Store
#[derive(Parser, Debug)]
#[command(name = "tams-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the TAMS endpoint, overrides the config file
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a timerange and print its canonical form
    Timerange {
        /// Timerange string, e.g. "0:0_3600:0"
        #[arg(allow_hyphen_values = true)]
        raw: String,
    },

    /// Print the canonical query string for a filter set
    Query {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Parse a Link header and print its entries
    Links {
        /// Raw header value
        header: String,
    },

    /// Page through a list endpoint
    List {
        /// Endpoint to list
        resource: ListResource,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Show the service description
    Service,
}

/// List endpoints selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListResource {
    Flows,
    Sources,
    Objects,
}

impl From<ListResource> for Resource {
    fn from(resource: ListResource) -> Self {
        match resource {
            ListResource::Flows => Resource::Flows,
            ListResource::Sources => Resource::Sources,
            ListResource::Objects => Resource::Objects,
        }
    }
}

/// Filter flags shared by `query` and `list`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Inline filter set JSON; flags below are applied on top
    #[arg(long)]
    pub filters_json: Option<String>,

    /// Exact label
    #[arg(long)]
    pub label: Option<String>,

    /// Format URN, e.g. urn:x-nmos:format:video
    #[arg(long = "flow-format")]
    pub flow_format: Option<String>,

    /// Codec name
    #[arg(long)]
    pub codec: Option<String>,

    /// Tag filter as key=value (repeatable)
    #[arg(long = "tag", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,

    /// Tag that must be present (repeatable)
    #[arg(long = "tag-exists")]
    pub tag_exists: Vec<String>,

    /// Timerange filter
    #[arg(long, allow_hyphen_values = true)]
    pub timerange: Option<String>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,

    /// Start from this cursor
    #[arg(long)]
    pub cursor: Option<String>,
}

impl FilterArgs {
    /// Build a filter set, using `default_limit` when no limit is given
    pub fn to_filter_set(&self, default_limit: u32) -> Result<FilterSet> {
        let mut filters = match &self.filters_json {
            Some(json) => {
                serde_json::from_str::<FilterSet>(json).context("Invalid --filters-json")?
            }
            None => FilterSet::new().with_limit(default_limit),
        };

        if let Some(label) = &self.label {
            filters = filters.with_label(label);
        }
        if let Some(format) = &self.flow_format {
            filters = filters.with_format(format);
        }
        if let Some(codec) = &self.codec {
            filters = filters.with_codec(codec);
        }
        for (key, value) in &self.tags {
            filters = filters.with_tag(key, value);
        }
        for key in &self.tag_exists {
            filters = filters.with_tag_exists(key);
        }
        if let Some(raw) = &self.timerange {
            filters = filters.with_timerange(raw.parse::<Timerange>()?);
        }
        if let Some(limit) = self.limit {
            filters = filters.with_limit(limit);
        }
        if let Some(cursor) = &self.cursor {
            filters = filters.with_cursor(cursor);
        }

        filters.validate()?;
        Ok(filters)
    }
}

fn parse_tag(raw: &str) -> std::result::Result<(String, String), Error> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| Error::validation("tag", format!("expected key=value, got '{raw}'")))
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
