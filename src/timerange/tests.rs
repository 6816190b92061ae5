//! Tests for timerange module

use super::*;
use crate::error::ErrorKind;
use pretty_assertions::assert_eq;
use std::time::Duration;
use test_case::test_case;

fn ts(seconds: u64, nanos: u32) -> Timestamp {
    Timestamp::new(seconds, nanos).unwrap()
}

// ============================================================================
// Parse Tests
// ============================================================================

#[test]
fn test_parse_bounded() {
    let range = parse("0:0_3600:0").unwrap();

    assert_eq!(range.start_seconds(), 0);
    assert_eq!(range.start_nanos(), 0);
    assert_eq!(range.end_seconds(), 3600);
    assert_eq!(range.end_nanos(), 0);
    assert!(!range.is_start_unbounded());
    assert!(!range.is_end_unbounded());
}

#[test]
fn test_parse_unbounded_start() {
    let range = parse("_3600:0").unwrap();
    assert!(range.is_start_unbounded());
    assert!(!range.is_end_unbounded());
    assert_eq!(range.end(), Some(ts(3600, 0)));
}

#[test]
fn test_parse_unbounded_end() {
    let range = parse("0:0_").unwrap();
    assert_eq!(range.start(), Some(Timestamp::ZERO));
    assert!(range.is_end_unbounded());
}

#[test]
fn test_parse_empty_is_fully_unbounded() {
    let range = parse("").unwrap();
    assert!(range.is_unbounded());
    assert_eq!(range, Timerange::unbounded());

    assert!(parse("_").unwrap().is_unbounded());
    assert!(parse("   ").unwrap().is_unbounded());
}

#[test]
fn test_parse_nanos() {
    let range = parse("10:500000000_20:999999999").unwrap();
    assert_eq!(range.start(), Some(ts(10, 500_000_000)));
    assert_eq!(range.end(), Some(ts(20, 999_999_999)));
}

#[test]
fn test_parse_instant() {
    let range = parse("42:5").unwrap();
    assert_eq!(range.start(), range.end());
    assert_eq!(range.start(), Some(ts(42, 5)));
}

#[test_case("0:0_-1:0" ; "negative end seconds")]
#[test_case("-5:0_10:0" ; "negative start seconds")]
#[test_case("0:-1_10:0" ; "negative nanos")]
#[test_case("0:1000000000_10:0" ; "nanos out of range")]
#[test_case("10:0_5:0" ; "start after end")]
#[test_case("10:5_10:4" ; "start after end by nanos")]
#[test_case("0:0_1:0_2:0" ; "two separators")]
#[test_case("a:0_1:0" ; "non numeric seconds")]
#[test_case("0:x_1:0" ; "non numeric nanos")]
#[test_case("0:_1:0" ; "missing nanos after colon")]
#[test_case(":0_1:0" ; "missing seconds")]
#[test_case("[0:0_1:0)" ; "inclusivity brackets")]
#[test_case("99999999999999999999:0_" ; "seconds overflow")]
fn test_parse_rejects(raw: &str) {
    let err = parse(raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_parse_error_mentions_input() {
    let err = parse("0:0_-1:0").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("0:0_-1:0"), "{message}");
    assert!(message.contains("negative"), "{message}");
}

// ============================================================================
// Serialize Tests
// ============================================================================

#[test]
fn test_serialize_forms() {
    assert_eq!(serialize(&Timerange::unbounded()), "");
    assert_eq!(serialize(&Timerange::starting_at(ts(5, 0))), "5:0_");
    assert_eq!(serialize(&Timerange::ending_at(ts(3600, 0))), "_3600:0");
    assert_eq!(
        serialize(&Timerange::between(ts(1, 2), ts(3, 4)).unwrap()),
        "1:2_3:4"
    );
}

#[test_case("0:0_3600:0", "0:0_3600:0" ; "bounded")]
#[test_case("_3600:0", "_3600:0" ; "open start")]
#[test_case("0:0_", "0:0_" ; "open end")]
#[test_case("", "" ; "fully open")]
#[test_case("_", "" ; "bare separator")]
#[test_case("10_20", "10:0_20:0" ; "seconds only")]
#[test_case("007:0010_08:0", "7:10_8:0" ; "leading zeros")]
#[test_case("  1:0_2:0 ", "1:0_2:0" ; "surrounding whitespace")]
#[test_case("42:5", "42:5_42:5" ; "instant")]
fn test_serialize_parse_is_canonical(raw: &str, canonical: &str) {
    assert_eq!(serialize(&parse(raw).unwrap()), canonical);
    assert_eq!(canonical_form(raw).unwrap(), canonical);
    // canonical strings are fixed points
    assert_eq!(canonical_form(canonical).unwrap(), canonical);
}

#[test]
fn test_display_and_from_str() {
    let range: Timerange = "1:0_2:0".parse().unwrap();
    assert_eq!(range.to_string(), "1:0_2:0");

    let stamp: Timestamp = "12:34".parse().unwrap();
    assert_eq!(stamp, ts(12, 34));
    assert_eq!(stamp.to_string(), "12:34");
}

#[test]
fn test_serde_as_string() {
    let range = parse("_3600:0").unwrap();
    let json = serde_json::to_string(&range).unwrap();
    assert_eq!(json, "\"_3600:0\"");

    let back: Timerange = serde_json::from_str(&json).unwrap();
    assert_eq!(back, range);

    let bad: std::result::Result<Timerange, _> = serde_json::from_str("\"5:0_1:0\"");
    assert!(bad.is_err());
}

// ============================================================================
// Timerange Operations
// ============================================================================

#[test]
fn test_new_rejects_inverted_bounds() {
    assert!(Timerange::between(ts(10, 0), ts(9, 999_999_999)).is_err());
    assert!(Timerange::between(ts(10, 0), ts(10, 0)).is_ok());
}

#[test]
fn test_timestamp_rejects_large_nanos() {
    assert!(Timestamp::new(0, NANOS_PER_SECOND).is_err());
    assert!(Timestamp::new(0, NANOS_PER_SECOND - 1).is_ok());
}

#[test]
fn test_contains() {
    let range = parse("10:0_20:0").unwrap();
    assert!(range.contains(ts(10, 0)));
    assert!(range.contains(ts(15, 0)));
    assert!(range.contains(ts(20, 0)));
    assert!(!range.contains(ts(20, 1)));
    assert!(!range.contains(ts(9, 999_999_999)));

    assert!(Timerange::unbounded().contains(ts(u64::MAX, 0)));
    assert!(parse("_5:0").unwrap().contains(Timestamp::ZERO));
}

#[test]
fn test_overlaps() {
    let a = parse("10:0_20:0").unwrap();
    assert!(a.overlaps(&parse("15:0_25:0").unwrap()));
    assert!(a.overlaps(&parse("20:0_30:0").unwrap()));
    assert!(!a.overlaps(&parse("20:1_30:0").unwrap()));
    assert!(a.overlaps(&parse("_10:0").unwrap()));
    assert!(!a.overlaps(&parse("_9:0").unwrap()));
    assert!(a.overlaps(&Timerange::unbounded()));
}

#[test]
fn test_duration() {
    let range = parse("1:500000000_3:0").unwrap();
    assert_eq!(range.duration(), Some(Duration::from_millis(1500)));
    assert_eq!(parse("1:0_").unwrap().duration(), None);
}

#[test]
fn test_timestamp_duration_conversion() {
    let stamp = Timestamp::from_duration(Duration::from_millis(2_250));
    assert_eq!(stamp, ts(2, 250_000_000));
    assert_eq!(stamp.as_duration(), Duration::from_millis(2_250));
    assert_eq!(Timestamp::from_seconds(7), ts(7, 0));
}
