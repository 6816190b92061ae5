//! Filter set types

use crate::error::{Error, Result};
use crate::timerange::Timerange;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Page size used when the caller does not pick one
pub const DEFAULT_LIMIT: u32 = 100;

/// Structured filters for a media-entity query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    /// Exact label match
    pub label: Option<String>,
    /// Format URN (e.g. "urn:x-nmos:format:video")
    pub format: Option<String>,
    /// Codec name
    pub codec: Option<String>,
    /// Exact-match tag filters
    pub tags: BTreeMap<String, String>,
    /// Tags that must be present, whatever their value
    pub tag_exists: BTreeSet<String>,
    /// Media time filter
    pub timerange: Option<Timerange>,
    /// Page size, must be greater than zero
    pub limit: u32,
    /// Opaque cursor of the page to fetch
    pub cursor: Option<String>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            label: None,
            format: None,
            codec: None,
            tags: BTreeMap::new(),
            tag_exists: BTreeSet::new(),
            timerange: None,
            limit: DEFAULT_LIMIT,
            cursor: None,
        }
    }
}

impl FilterSet {
    /// Create an empty filter set with the default limit
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }

    /// Add an exact-match tag filter
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Require a tag to be present
    #[must_use]
    pub fn with_tag_exists(mut self, key: impl Into<String>) -> Self {
        self.tag_exists.insert(key.into());
        self
    }

    #[must_use]
    pub fn with_timerange(mut self, timerange: Timerange) -> Self {
        self.timerange = Some(timerange);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Same filters pointing at another page
    #[must_use]
    pub fn at_cursor(&self, cursor: Option<String>) -> Self {
        Self {
            cursor,
            ..self.clone()
        }
    }

    /// Check the filter set for values the API cannot express
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(Error::validation("limit", "must be greater than zero"));
        }

        if self.tags.keys().any(String::is_empty) || self.tag_exists.iter().any(String::is_empty)
        {
            return Err(Error::validation("tags", "tag keys cannot be empty"));
        }

        if let Some(key) = self.tags.keys().find(|k| self.tag_exists.contains(*k)) {
            return Err(Error::validation(
                format!("tag.{key}"),
                "key is used by both tags and tag_exists",
            ));
        }

        Ok(())
    }
}
