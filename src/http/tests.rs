//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert!(config.timeout.is_none());
    assert!(config.user_agent.starts_with("pagebench/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

// ============================================================================
// URL Composition Tests
// ============================================================================

#[test]
fn test_compose_url_plain_path() {
    let url = compose_url("http://localhost:8080", "/api/items", &[("page", "0")]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/api/items?page=0");
}

#[test]
fn test_compose_url_existing_query() {
    let url = compose_url(
        "http://localhost:8080/",
        "api/items?size=100",
        &[("afterId", "42")],
    )
    .unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/api/items?size=100&afterId=42");
}

#[test]
fn test_compose_url_keeps_base_prefix() {
    let url = compose_url("http://host/v2", "/items", &[]).unwrap();
    assert_eq!(url.as_str(), "http://host/v2/items");
}

#[test]
fn test_compose_url_absolute_path_wins() {
    let url = compose_url("http://ignored", "https://api.example.com/x", &[]).unwrap();
    assert_eq!(url.as_str(), "https://api.example.com/x");
}

#[test]
fn test_compose_url_invalid_base() {
    let err = compose_url("not a url", "/items", &[]).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

// ============================================================================
// Requester Tests
// ============================================================================

#[tokio::test]
async fn test_http_client_get_reads_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\":[]}"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = compose_url(&mock_server.uri(), "/api/items", &[("page", "2")]).unwrap();
    let response = client.get(&url).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.size(), 12);
    assert!(response.elapsed_ms() >= 0.0);
}

#[tokio::test]
async fn test_http_client_error_status_is_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = compose_url(&mock_server.uri(), "/broken", &[]).unwrap();
    let response = client.get(&url).await.unwrap();

    assert_eq!(response.status, 503);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_http_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert_eq!(client.config().timeout, Some(Duration::from_millis(100)));
    let url = compose_url(&mock_server.uri(), "/slow", &[]).unwrap();

    let err = client.get(&url).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_http_client_connection_refused() {
    let client = HttpClient::new().unwrap();
    let url = compose_url("http://127.0.0.1:1", "/", &[]).unwrap();

    let err = client.get(&url).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
