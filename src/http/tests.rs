//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use reqwest::Method;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

async fn get_value(client: &HttpClient, url: &str) -> crate::error::Result<serde_json::Value> {
    client.get_json_with_config(url, RequestConfig::new()).await
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("message-exporter/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com/v1")
        .timeout(Duration::from_secs(60))
        .header("X-API-KEY", "value")
        .no_rate_limit()
        .build();

    assert_eq!(
        config.base_url,
        Some("https://api.example.com/v1".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-API-KEY"),
        Some(&"value".to_string())
    );
    assert!(config.rate_limit.is_none());
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("limit", "100")
        .query_opt("nextToken", None::<String>)
        .query_opt("channelId", Some("ch-1"));

    assert_eq!(
        config.query,
        vec![
            ("limit".to_string(), "100".to_string()),
            ("channelId".to_string(), "ch-1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "c1"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let data = get_value(&client, "/v1/clients").await.unwrap();

    assert_eq!(data["data"][0]["id"], "c1");
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("channelId", "ch-1"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": []
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .request(
            Method::GET,
            "/messages",
            RequestConfig::new()
                .query("channelId", "ch-1")
                .query("limit", "100"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("X-API-KEY", "secret123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-API-KEY", "secret123")
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let response = client
        .request(Method::GET, "/secure", RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_404_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = get_value(&client, "/missing").await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not found");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_does_not_retry_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = get_value(&client, "/flaky").await;

    assert!(matches!(result, Err(Error::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn test_http_client_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = get_value(&client, "/broken").await;

    assert!(matches!(result, Err(Error::JsonParse(_))));
}

#[tokio::test]
async fn test_http_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let result = client
        .request(Method::GET, "/slow", RequestConfig::new())
        .await;

    assert!(matches!(result, Err(Error::Timeout { timeout_ms: 50 })));
}

#[tokio::test]
async fn test_http_client_full_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().no_rate_limit().build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .request(
            Method::GET,
            &format!("{}/api/test", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[test]
fn test_http_client_debug_hides_header_values() {
    let config = HttpClientConfig::builder()
        .header("X-API-KEY", "super-secret")
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("X-API-KEY"));
    assert!(debug_str.contains("has_rate_limiter: true"));
    assert!(!debug_str.contains("super-secret"));
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();

    let client = HttpClient::with_config(config).unwrap();

    for _ in 0..3 {
        let response = client
            .request(Method::GET, "/data", RequestConfig::new())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
