//! Timerange string codec
//!
//! Parses the wire form into a [`Timerange`] and serializes it back to the
//! minimal canonical form.

use super::types::{Timerange, Timestamp, NANOS_PER_SECOND};
use crate::error::{Error, Result};

/// Separator between the start and end halves
const RANGE_SEPARATOR: char = '_';

/// Separator between seconds and nanoseconds
const NANOS_SEPARATOR: char = ':';

/// Parse a timerange string
///
/// Accepts `"s:n_s:n"`, `"_s:n"`, `"s:n_"`, `""` (fully unbounded) and a
/// bare timestamp, which denotes an instantaneous range.
///
/// # Examples
///
/// ```
/// use tams_client::timerange;
///
/// let range = timerange::parse("0:0_3600:0").unwrap();
/// assert_eq!(range.end_seconds(), 3600);
/// assert!(timerange::parse("0:0_-1:0").is_err());
/// ```
pub fn parse(raw: &str) -> Result<Timerange> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Timerange::unbounded());
    }

    if trimmed.matches(RANGE_SEPARATOR).count() > 1 {
        return Err(Error::parse(raw, "more than one '_' separator"));
    }

    let (start, end) = match trimmed.split_once(RANGE_SEPARATOR) {
        Some((start, end)) => (
            parse_bound(start, raw)?,
            parse_bound(end, raw)?,
        ),
        None => {
            let instant = parse_timestamp_in(trimmed, raw)?;
            (Some(instant), Some(instant))
        }
    };

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(Error::parse(raw, format!("start {s} is after end {e}")));
        }
    }

    Timerange::new(start, end)
}

/// Serialize a timerange to its canonical string
///
/// A side is omitted only when it is unbounded; the fully unbounded range
/// serializes to the empty string.
pub fn serialize(range: &Timerange) -> String {
    match (range.start(), range.end()) {
        (None, None) => String::new(),
        (Some(start), None) => format!("{start}{RANGE_SEPARATOR}"),
        (None, Some(end)) => format!("{RANGE_SEPARATOR}{end}"),
        (Some(start), Some(end)) => format!("{start}{RANGE_SEPARATOR}{end}"),
    }
}

/// Canonical form of a raw timerange string
pub fn canonical_form(raw: &str) -> Result<String> {
    parse(raw).map(|range| serialize(&range))
}

/// Parse a single `seconds[:nanos]` timestamp
pub(crate) fn parse_timestamp(raw: &str) -> Result<Timestamp> {
    parse_timestamp_in(raw, raw)
}

fn parse_bound(part: &str, raw: &str) -> Result<Option<Timestamp>> {
    if part.is_empty() {
        Ok(None)
    } else {
        parse_timestamp_in(part, raw).map(Some)
    }
}

fn parse_timestamp_in(part: &str, raw: &str) -> Result<Timestamp> {
    let (seconds, nanos) = match part.split_once(NANOS_SEPARATOR) {
        Some((seconds, nanos)) => (seconds, Some(nanos)),
        None => (part, None),
    };

    let seconds = parse_component(seconds, "seconds", raw)?;
    let nanos = match nanos {
        Some(nanos) => parse_component(nanos, "nanoseconds", raw)?,
        None => 0,
    };

    if nanos >= u64::from(NANOS_PER_SECOND) {
        return Err(Error::parse(
            raw,
            format!("nanoseconds {nanos} must be below {NANOS_PER_SECOND}"),
        ));
    }

    Timestamp::new(seconds, nanos as u32)
}

fn parse_component(digits: &str, name: &str, raw: &str) -> Result<u64> {
    if digits.is_empty() {
        return Err(Error::parse(raw, format!("missing {name}")));
    }
    if digits.starts_with('-') {
        return Err(Error::parse(raw, format!("negative {name} '{digits}'")));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::parse(
            raw,
            format!("{name} '{digits}' is not a decimal integer"),
        ));
    }
    digits
        .parse::<u64>()
        .map_err(|e| Error::parse(raw, format!("{name} '{digits}': {e}")))
}
