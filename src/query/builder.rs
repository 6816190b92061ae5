//! Canonical query string encoding

use super::types::FilterSet;
use crate::error::{Error, Result};
use crate::link::CURSOR_PARAM;
use crate::timerange;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

/// Everything except RFC 3986 unreserved characters
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const TAG_PREFIX: &str = "tag.";
const TAG_EXISTS_PREFIX: &str = "tag_exists.";

/// Build the canonical query string for a filter set
///
/// # Examples
///
/// ```
/// use tams_client::query::{build, FilterSet};
///
/// let filters = FilterSet::new()
///     .with_format("urn:x-nmos:format:video")
///     .with_tag("quality", "hd")
///     .with_limit(10);
/// assert_eq!(
///     build(&filters).unwrap(),
///     "format=urn%3Ax-nmos%3Aformat%3Avideo&limit=10&tag.quality=hd"
/// );
/// ```
pub fn build(filters: &FilterSet) -> Result<String> {
    let query = query_pairs(filters)?
        .iter()
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    Ok(query)
}

/// Validated, unencoded `(name, value)` pairs sorted by name
pub fn query_pairs(filters: &FilterSet) -> Result<Vec<(String, String)>> {
    filters.validate()?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut push = |name: &str, value: Option<&str>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            pairs.push((name.to_string(), value.to_string()));
        }
    };

    push("label", filters.label.as_deref());
    push("format", filters.format.as_deref());
    push("codec", filters.codec.as_deref());
    push(CURSOR_PARAM, filters.cursor.as_deref());
    push("limit", Some(filters.limit.to_string().as_str()));
    if let Some(range) = &filters.timerange {
        push("timerange", Some(timerange::serialize(range).as_str()));
    }

    for (key, value) in &filters.tags {
        pairs.push((format!("{TAG_PREFIX}{key}"), value.clone()));
    }
    for key in &filters.tag_exists {
        pairs.push((format!("{TAG_EXISTS_PREFIX}{key}"), "true".to_string()));
    }

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

/// Percent-encode one query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Parse a query string back into a filter set
///
/// Unknown parameters are ignored. The result is validated like any other
/// filter set.
pub fn parse_query(query: &str) -> Result<FilterSet> {
    let mut filters = FilterSet::new();

    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = decode_component(name, pair)?;
        let value = decode_component(value, pair)?;

        match name.as_str() {
            "label" => filters.label = Some(value),
            "format" => filters.format = Some(value),
            "codec" => filters.codec = Some(value),
            "limit" => {
                filters.limit = value
                    .parse()
                    .map_err(|e| Error::validation("limit", format!("'{value}': {e}")))?;
            }
            "timerange" => filters.timerange = Some(timerange::parse(&value)?),
            CURSOR_PARAM => filters.cursor = Some(value),
            _ => {
                if let Some(key) = name.strip_prefix(TAG_EXISTS_PREFIX) {
                    if value == "true" {
                        filters.tag_exists.insert(key.to_string());
                    }
                } else if let Some(key) = name.strip_prefix(TAG_PREFIX) {
                    filters.tags.insert(key.to_string(), value);
                } else {
                    debug!(parameter = %name, "Ignoring unknown query parameter");
                }
            }
        }
    }

    filters.validate()?;
    Ok(filters)
}

fn decode_component(raw: &str, pair: &str) -> Result<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::parse(pair, format!("invalid UTF-8 after decoding: {e}")))
}
