//! Lenient RFC 5988 Link header parser
//!
//! Format: `<url>; rel="next"; title="x", <url>; rel="prev"`

use super::types::{LinkEntry, LinkHeader};
use crate::error::{Error, Result};
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use url::Url;

/// Query parameter that carries the opaque cursor token
pub const CURSOR_PARAM: &str = "page";

/// Base used to resolve relative link targets
const RELATIVE_BASE: &str = "http://localhost/";

/// Parse a `Link` header value
///
/// Malformed entries are skipped with a warning; the rest are returned in
/// header order.
pub fn parse(header: &str) -> LinkHeader {
    let mut entries = Vec::new();

    for raw in split_outside(header, ',') {
        match parse_entry(raw) {
            Ok(parsed) => entries.extend(parsed),
            Err(e) => warn!(entry = raw, error = %e, "Skipping malformed Link entry"),
        }
    }

    LinkHeader::from_entries(entries)
}

/// Read the cursor token from a link target
///
/// Returns the percent-decoded `page` query parameter, or `None` when it is
/// absent or empty. Relative URLs are accepted.
pub fn extract_cursor(url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_BASE).and_then(|base| base.join(url)).ok()?
        }
        Err(e) => {
            debug!(url, error = %e, "Link target is not a valid URL");
            return None;
        }
    };

    parsed
        .query()?
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == CURSOR_PARAM)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

/// Parse one comma-separated entry into one entry per relation type
fn parse_entry(raw: &str) -> Result<Vec<LinkEntry>> {
    let rest = raw
        .strip_prefix('<')
        .ok_or_else(|| Error::parse(raw, "entry does not start with '<url>'"))?;
    let (url, rest) = rest
        .split_once('>')
        .ok_or_else(|| Error::parse(raw, "unterminated '<url>'"))?;
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::parse(raw, "empty link target"));
    }

    let rest = rest.trim();
    let rest = match rest.strip_prefix(';') {
        Some(params) => params,
        None if rest.is_empty() => rest,
        None => return Err(Error::parse(raw, "expected ';' after link target")),
    };

    let mut params = BTreeMap::new();
    for param in split_outside(rest, ';') {
        let (key, value) = match param.split_once('=') {
            Some((key, value)) => (key.trim(), unquote(value.trim(), raw)?),
            None => (param, String::new()),
        };
        if key.is_empty() {
            return Err(Error::parse(raw, "parameter without a name"));
        }
        // Only the first occurrence of a parameter counts
        params.entry(key.to_ascii_lowercase()).or_insert(value);
    }

    let rel = params
        .remove("rel")
        .filter(|rel| !rel.trim().is_empty())
        .ok_or_else(|| Error::parse(raw, "missing rel parameter"))?;

    if let Some(bad) = rel.split_whitespace().find(|r| !is_relation_type(r)) {
        return Err(Error::parse(raw, format!("invalid relation type '{bad}'")));
    }

    Ok(rel
        .split_whitespace()
        .map(|relation| LinkEntry {
            relation: relation.to_ascii_lowercase(),
            url: url.to_string(),
            params: params.clone(),
        })
        .collect())
}

/// Registered relation names and extension relation URIs
fn is_relation_type(relation: &str) -> bool {
    relation
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-._:/~#?=&%+".contains(c))
}

/// Strip quotes from a parameter value, undoing backslash escapes
fn unquote(value: &str, raw: &str) -> Result<String> {
    let Some(inner) = value.strip_prefix('"') else {
        return Ok(value.to_string());
    };
    let inner = inner
        .strip_suffix('"')
        .ok_or_else(|| Error::parse(raw, "unterminated quoted string"))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Split on `sep`, ignoring separators inside `<...>` and quoted strings
fn split_outside(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_target = false;
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' if !in_target => in_quotes = !in_quotes,
            '<' if !in_quotes => in_target = true,
            '>' if !in_quotes => in_target = false,
            c if c == sep && !in_target && !in_quotes => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
