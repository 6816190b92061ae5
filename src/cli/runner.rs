//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FilterArgs, ListResource, OutputFormat};
use crate::client::{Resource, TamsClient};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::query::{self, DEFAULT_LIMIT};
use crate::{link, timerange};
use serde_json::{json, Value};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        self.output(&output);
        Ok(())
    }

    /// Run the command and return its output document
    pub async fn execute(&self) -> Result<Value> {
        match &self.cli.command {
            Commands::Timerange { raw } => Self::timerange(raw),
            Commands::Query { filters } => self.query(filters),
            Commands::Links { header } => Ok(Self::links(header)),
            Commands::List {
                resource,
                filters,
                pages,
            } => self.list(*resource, filters, *pages).await,
            Commands::Service => self.service().await,
        }
    }

    // ========================================================================
    // Offline commands
    // ========================================================================

    fn timerange(raw: &str) -> Result<Value> {
        let range = timerange::parse(raw)?;
        Ok(json!({
            "input": raw,
            "canonical": timerange::serialize(&range),
            "start_seconds": range.start_seconds(),
            "start_nanos": range.start_nanos(),
            "end_seconds": range.end_seconds(),
            "end_nanos": range.end_nanos(),
            "start_unbounded": range.is_start_unbounded(),
            "end_unbounded": range.is_end_unbounded(),
            "duration_nanos": range.duration().map(|d| d.as_nanos().to_string()),
        }))
    }

    fn query(&self, args: &FilterArgs) -> Result<Value> {
        let filters = args.to_filter_set(self.default_limit()?)?;
        Ok(json!({ "query": query::build(&filters)? }))
    }

    fn links(header: &str) -> Value {
        let entries: Vec<Value> = link::parse(header)
            .iter()
            .map(|entry| {
                json!({
                    "rel": entry.relation,
                    "url": entry.url,
                    "cursor": entry.cursor(),
                    "params": entry.params,
                })
            })
            .collect();
        json!({ "links": entries })
    }

    // ========================================================================
    // Network commands
    // ========================================================================

    async fn list(&self, resource: ListResource, args: &FilterArgs, pages: usize) -> Result<Value> {
        let client = self.client()?;
        let resource = Resource::from(resource);
        let filters = args.to_filter_set(client.default_limit())?;

        info!(%resource, "Listing");
        let pages = client.pages(resource, filters, pages).await?;
        let fetched: Vec<Value> = pages
            .iter()
            .map(|page| {
                json!({
                    "page": page.state.page_number(),
                    "count": page.items().len(),
                    "total_count": page.state.total_count,
                    "next_cursor": page.state.next_cursor,
                    "items": page.items(),
                })
            })
            .collect();

        Ok(json!({
            "resource": resource,
            "pages": fetched,
            "state": pages.last().map(|page| &page.state),
        }))
    }

    async fn service(&self) -> Result<Value> {
        self.client()?.service().await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Resolve the client config from `--config` and `--base-url`
    fn load_config(&self) -> Result<Option<ClientConfig>> {
        let mut config = match &self.cli.config {
            Some(path) => Some(ClientConfig::from_file(path)?),
            None => None,
        };

        if let Some(base_url) = &self.cli.base_url {
            let mut overridden = config.unwrap_or_else(|| ClientConfig::new(base_url));
            overridden.base_url.clone_from(base_url);
            overridden.validate()?;
            config = Some(overridden);
        }
        Ok(config)
    }

    fn default_limit(&self) -> Result<u32> {
        Ok(self
            .load_config()?
            .map_or(DEFAULT_LIMIT, |config| config.default_limit))
    }

    fn client(&self) -> Result<TamsClient<crate::transport::HttpTransport>> {
        let config = self
            .load_config()?
            .ok_or_else(|| Error::config("No endpoint configured (use --base-url or --config)"))?;
        TamsClient::from_config(&config)
    }

    /// Output a document
    fn output(&self, value: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}
