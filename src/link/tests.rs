//! Tests for link header module

use super::*;
use pretty_assertions::assert_eq;

// ============================================================================
// Parse Tests
// ============================================================================

#[test]
fn test_parse_next_and_prev() {
    let header = r#"<http://x/flows?page=a&limit=50>; rel="next", <http://x/flows?page=b&limit=50>; rel="prev""#;
    let links = parse(header);

    assert_eq!(links.len(), 2);
    assert_eq!(links.entries()[0].relation, "next");
    assert_eq!(links.entries()[0].url, "http://x/flows?page=a&limit=50");
    assert_eq!(links.entries()[1].relation, "prev");

    assert_eq!(extract_cursor(&links.entries()[0].url), Some("a".to_string()));
    assert_eq!(extract_cursor(&links.entries()[1].url), Some("b".to_string()));
    assert_eq!(links.cursor("next"), Some("a".to_string()));
    assert_eq!(links.cursor("prev"), Some("b".to_string()));
}

#[test]
fn test_parse_extra_params() {
    let links = parse(r#"<https://api.example.com/sources?page=x>; rel="next"; title="Next page"; type=application/json"#);
    let entry = links.get("next").unwrap();

    assert_eq!(entry.params.get("title"), Some(&"Next page".to_string()));
    assert_eq!(entry.params.get("type"), Some(&"application/json".to_string()));
    assert!(!entry.params.contains_key("rel"));
}

#[test]
fn test_parse_unquoted_rel_and_case() {
    let links = parse("</flows?page=z>; REL=Next");
    assert_eq!(links.len(), 1);
    assert_eq!(links.entries()[0].relation, "next");
    assert_eq!(links.cursor("NEXT"), Some("z".to_string()));
}

#[test]
fn test_parse_multiple_relation_types() {
    let links = parse(r#"</flows?page=9>; rel="next last""#);
    assert_eq!(links.len(), 2);
    assert_eq!(links.cursor("next"), Some("9".to_string()));
    assert_eq!(links.cursor("last"), Some("9".to_string()));
}

#[test]
fn test_parse_comma_inside_url_and_quotes() {
    let header = r#"</flows?page=a,b>; rel="next"; title="one, two", </flows?page=c>; rel="prev""#;
    let links = parse(header);

    assert_eq!(links.len(), 2);
    assert_eq!(links.cursor("next"), Some("a,b".to_string()));
    assert_eq!(
        links.get("next").unwrap().params.get("title"),
        Some(&"one, two".to_string())
    );
    assert_eq!(links.cursor("prev"), Some("c".to_string()));
}

#[test]
fn test_parse_escaped_quotes() {
    let links = parse(r#"</flows>; rel="next"; title="say \"hi\"""#);
    assert_eq!(
        links.get("next").unwrap().params.get("title"),
        Some(&r#"say "hi""#.to_string())
    );
}

#[test]
fn test_parse_skips_malformed_entries() {
    let header = concat!(
        r#"garbage, "#,
        r#"</flows?page=a>; rel="next", "#,
        r#"</flows?page=b>, "#,
        r#"</flows?page=c> rel="prev", "#,
        r#"<>; rel="first", "#,
        r#"</flows?page=d>; rel="unterminated, "#,
        r#"</flows?page=e>; rel="last""#
    );
    let links = parse(header);

    let relations: Vec<&str> = links.iter().map(|e| e.relation.as_str()).collect();
    assert_eq!(relations, vec!["next"]);
    assert_eq!(links.cursor("next"), Some("a".to_string()));
}

#[test]
fn test_parse_skips_then_continues() {
    let links = parse(r#"not-a-link; rel="next", </flows?page=ok>; rel="next""#);
    assert_eq!(links.len(), 1);
    assert_eq!(links.cursor("next"), Some("ok".to_string()));
}

#[test]
fn test_parse_empty_header() {
    assert!(parse("").is_empty());
    assert!(parse(" , ,").is_empty());
}

#[test]
fn test_last_duplicate_relation_wins() {
    let links = parse(r#"</flows?page=first>; rel="next", </flows?page=second>; rel="next""#);

    assert_eq!(links.len(), 2);
    assert_eq!(links.cursor("next"), Some("second".to_string()));
}

#[test]
fn test_first_rel_param_counts() {
    let links = parse(r#"</flows?page=a>; rel="next"; rel="prev""#);
    assert_eq!(links.len(), 1);
    assert_eq!(links.entries()[0].relation, "next");
}

#[test]
fn test_entry_roundtrip_through_json() {
    let links = parse(r#"</flows?page=a>; rel="next""#);
    let entry = links.into_entries().remove(0);
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json, serde_json::json!({"relation": "next", "url": "/flows?page=a"}));
}

// ============================================================================
// Cursor Extraction Tests
// ============================================================================

#[test]
fn test_extract_cursor_absolute() {
    assert_eq!(
        extract_cursor("https://tams.example.com/flows?limit=10&page=abc123"),
        Some("abc123".to_string())
    );
}

#[test]
fn test_extract_cursor_relative() {
    assert_eq!(extract_cursor("/flows?page=rel"), Some("rel".to_string()));
    assert_eq!(extract_cursor("?page=q"), Some("q".to_string()));
}

#[test]
fn test_extract_cursor_percent_decoded() {
    assert_eq!(
        extract_cursor("/flows?page=a%2Bb%3D%3D"),
        Some("a+b==".to_string())
    );
    // '+' is kept literally, cursors are opaque
    assert_eq!(extract_cursor("/flows?page=a+b"), Some("a+b".to_string()));
}

#[test]
fn test_extract_cursor_absent() {
    assert_eq!(extract_cursor("/flows?limit=10"), None);
    assert_eq!(extract_cursor("/flows"), None);
    assert_eq!(extract_cursor("/flows?page="), None);
    assert_eq!(extract_cursor("/flows?pages=x"), None);
    assert_eq!(extract_cursor("http://[bad"), None);
}

#[test]
fn test_entry_cursor() {
    let entry = LinkEntry::new("next", "/sources?page=s1");
    assert_eq!(entry.cursor(), Some("s1".to_string()));
}
