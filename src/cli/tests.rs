//! Tests for the CLI module

use super::*;
use crate::error::ErrorKind;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["tams-client"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

// ============================================================================
// Argument Parsing
// ============================================================================

#[test]
fn test_parse_global_flags() {
    let cli = cli(&["--base-url", "http://localhost:4010", "-f", "pretty", "-v", "service"]);
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:4010"));
    assert_eq!(cli.format, OutputFormat::Pretty);
    assert!(cli.verbose);
    assert!(matches!(cli.command, Commands::Service));
}

#[test]
fn test_parse_list() {
    let cli = cli(&[
        "list",
        "sources",
        "--tag",
        "quality=hd",
        "--tag-exists",
        "owner",
        "--pages",
        "3",
    ]);
    let Commands::List {
        resource,
        filters,
        pages,
    } = cli.command
    else {
        panic!("expected list");
    };
    assert_eq!(resource, ListResource::Sources);
    assert_eq!(pages, 3);
    assert_eq!(filters.tags, vec![("quality".to_string(), "hd".to_string())]);
    assert_eq!(filters.tag_exists, vec!["owner".to_string()]);
}

#[test]
fn test_parse_rejects_bad_tag() {
    let result = Cli::try_parse_from(["tams-client", "query", "--tag", "novalue"]);
    assert!(result.is_err());
}

#[test]
fn test_filter_args_to_filter_set() {
    let args = FilterArgs {
        filters_json: Some(r#"{"label": "cam-1", "limit": 5}"#.to_string()),
        flow_format: Some("urn:x-nmos:format:video".to_string()),
        timerange: Some("0:0_10:0".to_string()),
        ..FilterArgs::default()
    };

    let filters = args.to_filter_set(50).unwrap();
    assert_eq!(filters.label.as_deref(), Some("cam-1"));
    assert_eq!(filters.limit, 5);
    assert_eq!(filters.format.as_deref(), Some("urn:x-nmos:format:video"));
    assert_eq!(filters.timerange.unwrap().end_seconds(), 10);

    let defaults = FilterArgs::default().to_filter_set(50).unwrap();
    assert_eq!(defaults.limit, 50);
}

#[test]
fn test_filter_args_bad_json() {
    let args = FilterArgs {
        filters_json: Some("{not json".to_string()),
        ..FilterArgs::default()
    };
    let err = args.to_filter_set(10).unwrap_err();
    assert!(err.to_string().starts_with("Invalid --filters-json: "));
}

#[test]
fn test_filter_args_validation() {
    let args = FilterArgs {
        limit: Some(0),
        ..FilterArgs::default()
    };
    assert_eq!(args.to_filter_set(10).unwrap_err().kind(), ErrorKind::Validation);

    let args = FilterArgs {
        timerange: Some("5:0_1:0".to_string()),
        ..FilterArgs::default()
    };
    assert_eq!(args.to_filter_set(10).unwrap_err().kind(), ErrorKind::Parse);
}

// ============================================================================
// Offline Commands
// ============================================================================

#[tokio::test]
async fn test_timerange_command() {
    let runner = Runner::new(cli(&["timerange", "_3600"]));
    let output = runner.execute().await.unwrap();

    assert_eq!(output["canonical"], "_3600:0");
    assert_eq!(output["start_unbounded"], true);
    assert_eq!(output["end_seconds"], 3600);
    assert_eq!(output["duration_nanos"], json!(null));
}

#[tokio::test]
async fn test_timerange_command_rejects_negative() {
    let runner = Runner::new(cli(&["timerange", "0:0_-1:0"]));
    let err = runner.execute().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn test_query_command() {
    let runner = Runner::new(cli(&[
        "query",
        "--flow-format",
        "urn:x-nmos:format:video",
        "--tag",
        "quality=hd",
        "--limit",
        "10",
    ]));
    let output = runner.execute().await.unwrap();
    assert_eq!(
        output,
        json!({"query": "format=urn%3Ax-nmos%3Aformat%3Avideo&limit=10&tag.quality=hd"})
    );
}

#[tokio::test]
async fn test_query_command_uses_config_limit() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "base_url: http://localhost:4010\ndefault_limit: 25").unwrap();

    let runner = Runner::new(cli(&[
        "--config",
        file.path().to_str().unwrap(),
        "query",
    ]));
    let output = runner.execute().await.unwrap();
    assert_eq!(output, json!({"query": "limit=25"}));
}

#[tokio::test]
async fn test_links_command() {
    let runner = Runner::new(cli(&[
        "links",
        r#"<http://x/flows?page=a&limit=50>; rel="next", <http://x/flows?page=b&limit=50>; rel="prev""#,
    ]));
    let output = runner.execute().await.unwrap();

    let links = output["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["rel"], "next");
    assert_eq!(links[0]["cursor"], "a");
    assert_eq!(links[1]["rel"], "prev");
    assert_eq!(links[1]["cursor"], "b");
}

// ============================================================================
// Network Commands
// ============================================================================

#[tokio::test]
async fn test_list_requires_endpoint() {
    let runner = Runner::new(cli(&["list", "flows"]));
    let err = runner.execute().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[tokio::test]
async fn test_list_command_pages_forward() {
    let server = MockServer::start().await;
    let next = format!("<{}/flows?limit=1&page=p2>; rel=\"next\"", server.uri());

    Mock::given(method("GET"))
        .and(path("/flows"))
        .and(query_param("page", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "f2"}]})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flows"))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "f1"}]))
                .insert_header("Link", next.as_str())
                .insert_header("X-Paging-Count", "2"),
        )
        .mount(&server)
        .await;

    let runner = Runner::new(cli(&[
        "--base-url",
        &server.uri(),
        "list",
        "flows",
        "--limit",
        "1",
        "--pages",
        "5",
    ]));
    let output = runner.execute().await.unwrap();

    let pages = output["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["items"], json!([{"id": "f1"}]));
    assert_eq!(pages[0]["total_count"], 2);
    assert_eq!(pages[1]["items"], json!([{"id": "f2"}]));
    assert_eq!(pages[1]["page"], 2);
    assert_eq!(output["state"]["history"], json!([null]));
}

#[tokio::test]
async fn test_service_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/service"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"api_version": "6.0"})))
        .mount(&server)
        .await;

    let runner = Runner::new(cli(&["--base-url", &server.uri(), "service"]));
    let output = runner.execute().await.unwrap();
    assert_eq!(output, json!({"api_version": "6.0"}));
}
