//! Timerange and timestamp types
//!
//! A [`Timerange`] is immutable once built; every constructor checks that a
//! bounded range does not end before it starts.

use super::codec;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Nanoseconds in one second; nanosecond components must stay below this
pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// A point on the media timeline
///
/// Ordering is lexicographic on `(seconds, nanos)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    seconds: u64,
    nanos: u32,
}

impl Timestamp {
    /// The origin of the timeline
    pub const ZERO: Timestamp = Timestamp {
        seconds: 0,
        nanos: 0,
    };

    /// Create a timestamp, rejecting nanosecond values of one second or more
    pub fn new(seconds: u64, nanos: u32) -> Result<Self> {
        if nanos >= NANOS_PER_SECOND {
            return Err(Error::parse(
                format!("{seconds}:{nanos}"),
                format!("nanoseconds must be below {NANOS_PER_SECOND}"),
            ));
        }
        Ok(Self { seconds, nanos })
    }

    /// Create a timestamp on a whole second
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Create a timestamp from an offset since the timeline origin
    pub fn from_duration(duration: Duration) -> Self {
        Self {
            seconds: duration.as_secs(),
            nanos: duration.subsec_nanos(),
        }
    }

    /// Whole seconds
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Nanoseconds within the second
    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Offset since the timeline origin
    pub fn as_duration(&self) -> Duration {
        Duration::new(self.seconds, self.nanos)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.seconds, self.nanos)
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        codec::parse_timestamp(s.trim())
    }
}

/// An interval of media time, possibly open on either side
///
/// `None` for a bound means that side is unbounded. Both bounds are
/// inclusive for [`Timerange::contains`] and [`Timerange::overlaps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timerange {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl Timerange {
    /// Create a timerange, checking that it does not end before it starts
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(Error::parse(
                    format!("{s}_{e}"),
                    "start is after end".to_string(),
                ));
            }
        }
        Ok(Self { start, end })
    }

    /// Create a bounded timerange
    pub fn between(start: Timestamp, end: Timestamp) -> Result<Self> {
        Self::new(Some(start), Some(end))
    }

    /// The range that matches everything
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Range from `start` onwards
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Range up to and including `end`
    pub fn ending_at(end: Timestamp) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Start bound, `None` when unbounded
    pub fn start(&self) -> Option<Timestamp> {
        self.start
    }

    /// End bound, `None` when unbounded
    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }

    pub fn start_seconds(&self) -> u64 {
        self.start.map_or(0, |t| t.seconds)
    }

    pub fn start_nanos(&self) -> u32 {
        self.start.map_or(0, |t| t.nanos)
    }

    pub fn end_seconds(&self) -> u64 {
        self.end.map_or(0, |t| t.seconds)
    }

    pub fn end_nanos(&self) -> u32 {
        self.end.map_or(0, |t| t.nanos)
    }

    pub fn is_start_unbounded(&self) -> bool {
        self.start.is_none()
    }

    pub fn is_end_unbounded(&self) -> bool {
        self.end.is_none()
    }

    /// True when neither side is bounded
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Check whether a timestamp falls inside the range
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start.map_or(true, |s| s <= ts) && self.end.map_or(true, |e| ts <= e)
    }

    /// Check whether two ranges share at least one point
    pub fn overlaps(&self, other: &Timerange) -> bool {
        let starts_before_other_ends = match (self.start, other.end) {
            (Some(s), Some(e)) => s <= e,
            _ => true,
        };
        let other_starts_before_end = match (other.start, self.end) {
            (Some(s), Some(e)) => s <= e,
            _ => true,
        };
        starts_before_other_ends && other_starts_before_end
    }

    /// Length of a bounded range
    pub fn duration(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => e.as_duration().checked_sub(s.as_duration()),
            _ => None,
        }
    }
}

impl fmt::Display for Timerange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::serialize(self))
    }
}

impl FromStr for Timerange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        codec::parse(s)
    }
}

impl Serialize for Timerange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&codec::serialize(self))
    }
}

impl<'de> Deserialize<'de> for Timerange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        codec::parse(&raw).map_err(serde::de::Error::custom)
    }
}
