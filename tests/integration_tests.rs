//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: configuration → driver → report

use clap::Parser;
use pagebench::bench::BenchmarkDriver;
use pagebench::cli::{Cli, Runner};
use pagebench::config::{BenchConfig, ConfigSource};
use pagebench::error::{ErrorKind, Phase};
use pagebench::http::HttpClient;
use pagebench::Error;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const PAGE_SIZE: usize = 10;
const TOTAL_ITEMS: usize = 34;

fn query(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// HATEOAS-style pages: `?page=N`, `_links.next` while more items remain
struct OffsetPages;

impl Respond for OffsetPages {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let page: usize = query(request, "page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);
        let start = page * PAGE_SIZE;
        let content: Vec<Value> = (start..TOTAL_ITEMS.max(start))
            .take(PAGE_SIZE)
            .map(|id| json!({"id": id + 1, "name": format!("item-{}", id + 1)}))
            .collect();

        let mut links = json!({"self": {"href": format!("/api/v1/items?page={page}")}});
        if start + PAGE_SIZE < TOTAL_ITEMS {
            links["next"] = json!({"href": format!("/api/v1/items?page={}", page + 1)});
        }

        ResponseTemplate::new(200).set_body_json(json!({
            "content": content,
            "_links": links,
            "page": {"number": page, "size": PAGE_SIZE, "totalElements": TOTAL_ITEMS}
        }))
    }
}

/// Keyset pages: `?afterId=N` returns the next items with id > N
struct CursorPages;

impl Respond for CursorPages {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let after: usize = query(request, "afterId")
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);
        let items: Vec<Value> = (after + 1..=TOTAL_ITEMS)
            .take(PAGE_SIZE)
            .map(|id| json!({"id": id}))
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({ "items": items }))
    }
}

async fn start_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .respond_with(OffsetPages)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/items"))
        .respond_with(CursorPages)
        .mount(&mock_server)
        .await;

    mock_server
}

fn source(base_url: &str) -> ConfigSource {
    ConfigSource::from_pairs([
        ("BASE_URL", base_url),
        ("ENDPOINT_A_PATH", "/api/v1/items"),
        ("ENDPOINT_A_NAME", "Offset API"),
        ("ENDPOINT_B_PATH", "/api/v2/items"),
        ("ENDPOINT_B_NAME", "Keyset API"),
        ("PAGE_SIZE", "10"),
        ("WARMUP_REQUESTS", "2"),
        ("BENCHMARK_REQUESTS", "7"),
    ])
}

fn runner(args: &[&str]) -> Runner {
    let mut argv = vec!["pagebench"];
    argv.extend_from_slice(args);
    Runner::new(Cli::try_parse_from(argv).unwrap())
}

async fn requests_to(mock_server: &MockServer, route: &str) -> Vec<Request> {
    mock_server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == route)
        .collect()
}

// ============================================================================
// Driver Integration Tests
// ============================================================================

#[tokio::test]
async fn test_driver_traverses_both_styles() {
    let mock_server = start_server().await;
    let config = BenchConfig::resolve(&source(&mock_server.uri())).unwrap();
    let driver = BenchmarkDriver::from_config(&config).unwrap();

    let offset = driver.traverse(&config.endpoints[0]).await.unwrap();
    assert_eq!(offset.total_items, TOTAL_ITEMS as u64);
    assert_eq!(offset.page_count, 4);

    let cursor = driver.traverse(&config.endpoints[1]).await.unwrap();
    assert_eq!(cursor.total_items, TOTAL_ITEMS as u64);
    assert_eq!(cursor.page_count, 4);

    let cursors: Vec<String> = requests_to(&mock_server, "/api/v2/items")
        .await
        .iter()
        .filter_map(|r| query(r, "afterId"))
        .collect();
    assert_eq!(cursors, vec!["0", "10", "20", "30"]);
}

#[tokio::test]
async fn test_driver_sampling_request_count() {
    let mock_server = start_server().await;
    let config = BenchConfig::resolve(&source(&mock_server.uri())).unwrap();
    let driver = BenchmarkDriver::from_config(&config).unwrap();

    let samples = driver
        .sample_latency(&config.endpoints[0], 25)
        .await
        .unwrap();
    assert_eq!(samples.len(), 25);

    let pages: Vec<String> = requests_to(&mock_server, "/api/v1/items")
        .await
        .iter()
        .filter_map(|r| query(r, "page"))
        .collect();
    assert_eq!(pages.len(), 25);
    assert_eq!(&pages[..6], &["0", "1", "2", "3", "0", "1"]);
}

#[tokio::test]
async fn test_driver_measures_unpaginated_size() {
    let mock_server = start_server().await;
    let config = BenchConfig::resolve(&source(&mock_server.uri())).unwrap();
    let driver = BenchmarkDriver::new(
        Box::new(HttpClient::new().unwrap()),
        mock_server.uri(),
        10,
    );

    let size = driver.measure_size(&config.endpoints[1]).await.unwrap();
    let expected = serde_json::to_vec(&json!({
        "items": (1..=10).map(|id| json!({"id": id})).collect::<Vec<_>>()
    }))
    .unwrap()
    .len();
    assert_eq!(size, expected as u64);

    let received = requests_to(&mock_server, "/api/v2/items").await;
    assert_eq!(received.len(), 1);
    assert!(received[0].url.query().is_none());
}

// ============================================================================
// Runner Integration Tests
// ============================================================================

#[tokio::test]
async fn test_run_json_report() {
    let mock_server = start_server().await;
    let mut out = Vec::new();

    runner(&["--format", "json", "run"])
        .execute(&source(&mock_server.uri()), &mut out)
        .await
        .unwrap();

    let report: Value = serde_json::from_slice(&out).unwrap();
    let endpoints = report["endpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 2);
    assert_eq!(endpoints[0]["name"], "Offset API");
    assert_eq!(endpoints[0]["latency"]["count"], 7);
    assert_eq!(endpoints[0]["traversal"]["total_items"], TOTAL_ITEMS);
    assert_eq!(endpoints[1]["traversal"]["page_count"], 4);
    assert!(endpoints[1]["size_bytes"].as_u64().unwrap() > 0);

    let comparisons = report["comparisons"].as_array().unwrap();
    assert_eq!(comparisons.len(), 1);
    assert_eq!(comparisons[0]["baseline"], "A");
    assert_eq!(comparisons[0]["candidate"], "B");
    assert!(comparisons[0]["size"].as_f64().unwrap() > 0.0);

    // probe + warmup + samples + size + traversal
    assert_eq!(requests_to(&mock_server, "/api/v1/items").await.len(), 2 + 7 + 1 + 4);
    assert_eq!(
        requests_to(&mock_server, "/api/v2/items").await.len(),
        1 + 2 + 7 + 1 + 4
    );
}

#[tokio::test]
async fn test_run_table_report() {
    let mock_server = start_server().await;
    let mut out = Vec::new();

    runner(&["run"])
        .execute(&source(&mock_server.uri()), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Latency (ms)"));
    assert!(text.contains("Offset API"));
    assert!(text.contains("Keyset API vs Offset API: latency"));
}

#[tokio::test]
async fn test_run_in_parallel() {
    let mock_server = start_server().await;
    let config = BenchConfig::resolve(&ConfigSource::from_pairs([
        ("BASE_URL", mock_server.uri()),
        ("ENDPOINT_A_PATH", "/api/v1/items".to_string()),
        ("ENDPOINT_B_PATH", "/api/v2/items".to_string()),
        ("PAGE_SIZE", "10".to_string()),
        ("PARALLEL", "true".to_string()),
    ]))
    .unwrap();
    assert!(config.parallel);

    let driver = BenchmarkDriver::from_config(&config).unwrap();
    let results = driver.run(&config).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "A");
    assert!(results
        .iter()
        .all(|r| r.traversal.total_items == TOTAL_ITEMS as u64));
}

#[tokio::test]
async fn test_check_command() {
    let mock_server = start_server().await;
    let mut out = Vec::new();

    runner(&["check"])
        .execute(&source(&mock_server.uri()), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("OK: Keyset API answered"));
    assert_eq!(requests_to(&mock_server, "/api/v2/items").await.len(), 1);
    assert!(requests_to(&mock_server, "/api/v1/items").await.is_empty());
}

#[tokio::test]
async fn test_config_command() {
    let mut out = Vec::new();

    runner(&["config"])
        .execute(&source("http://localhost:9999"), &mut out)
        .await
        .unwrap();

    let config: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(config["base_url"], "http://localhost:9999");
    assert_eq!(config["page_size"], 10);
    assert_eq!(config["endpoints"][0]["pagination"]["kind"], "offset");
    assert_eq!(config["endpoints"][1]["pagination"]["kind"], "cursor");
    assert_eq!(config["endpoints"][1]["pagination"]["cursor_param"], "afterId");
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_missing_endpoint_is_configuration_error() {
    let mut out = Vec::new();
    let err = runner(&["run"])
        .execute(
            &ConfigSource::from_pairs([("ENDPOINT_A_PATH", "/only-a")]),
            &mut out,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.exit_code(), 2);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_liveness_error() {
    let mut out = Vec::new();
    let err = runner(&["run"])
        .execute(&source("http://127.0.0.1:1"), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Liveness);
    assert_eq!(err.exit_code(), 3);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_server_error_mid_run_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/items"))
        .respond_with(CursorPages)
        .mount(&mock_server)
        .await;

    let mut out = Vec::new();
    let err = runner(&["run"])
        .execute(&source(&mock_server.uri()), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Phase {
            phase: Phase::Sampling,
            ..
        }
    ));
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("Offset API"));
    assert!(out.is_empty());
}
