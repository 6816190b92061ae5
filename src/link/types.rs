//! Link header types

use super::parser::extract_cursor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One relation from a `Link` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Relation type, lowercased (e.g. "next", "prev", "first", "last")
    pub relation: String,
    /// Target URL as it appeared between `<` and `>`
    pub url: String,
    /// Remaining `key="value"` attributes, keys lowercased
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl LinkEntry {
    /// Create a link entry without extra attributes
    pub fn new(relation: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            url: url.into(),
            params: BTreeMap::new(),
        }
    }

    /// Cursor token carried by this entry's URL
    pub fn cursor(&self) -> Option<String> {
        extract_cursor(&self.url)
    }
}

/// All entries of a parsed `Link` header, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkHeader {
    entries: Vec<LinkEntry>,
}

impl LinkHeader {
    pub(crate) fn from_entries(entries: Vec<LinkEntry>) -> Self {
        Self { entries }
    }

    /// Entries in the order they appeared
    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    /// Consume into the ordered entries
    pub fn into_entries(self) -> Vec<LinkEntry> {
        self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a relation; the last occurrence wins
    pub fn get(&self, relation: &str) -> Option<&LinkEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.relation.eq_ignore_ascii_case(relation))
    }

    /// Cursor token for a relation
    pub fn cursor(&self, relation: &str) -> Option<String> {
        self.get(relation).and_then(LinkEntry::cursor)
    }
}

impl IntoIterator for LinkHeader {
    type Item = LinkEntry;
    type IntoIter = std::vec::IntoIter<LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a LinkHeader {
    type Item = &'a LinkEntry;
    type IntoIter = std::slice::Iter<'a, LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
