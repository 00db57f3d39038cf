//! Behavior tests against a mock upstream service.

mod common;

use std::time::Duration;

use sanctions_client::{ErrorKind, RiskLevel, SanctionsClient};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn search_normalizes_the_upstream_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "John Doe"))
        .and(query_param("limit", "50"))
        .and(query_param("offset", "0"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "e1", "name": "John Doe", "match_score": 95, "country": "RU"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server.uri());
    let results = client.search("John Doe").await.unwrap();

    assert_eq!(results.len(), 1);
    let entity = &results[0];
    assert_eq!(entity.entity_id, "e1");
    assert_eq!(entity.name, "John Doe");
    assert_eq!(entity.entity_type, "Unknown");
    assert_eq!(entity.match_score, Some(95));
    assert_eq!(entity.risk_level, RiskLevel::High);
    assert_eq!(entity.country.as_deref(), Some("RU"));

    server.verify().await;
}

#[tokio::test]
async fn missing_results_field_yields_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = common::test_client(&server.uri());
    assert!(client.search("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn server_errors_and_rate_limits_get_three_attempts() {
    for status in [500u16, 502, 503, 504, 429] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(status))
            .expect(3)
            .mount(&server)
            .await;

        let client = common::test_client(&server.uri());
        let error = client.search("acme").await.unwrap_err();

        let expected = if status == 429 {
            ErrorKind::RateLimited
        } else {
            ErrorKind::ServerError
        };
        assert_eq!(error.kind, expected, "status {status}");
        assert_eq!(error.http_status, Some(status), "status {status}");
        server.verify().await;
    }
}

#[tokio::test]
async fn client_errors_get_exactly_one_attempt() {
    for status in [400u16, 401, 403, 404] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let client = common::test_client(&server.uri());
        let error = client.search("acme").await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::ClientError, "status {status}");
        server.verify().await;
    }
}

#[tokio::test]
async fn transient_failures_recover_within_the_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server.uri());
    assert!(client.search("acme").await.unwrap().is_empty());
    server.verify().await;
}

#[tokio::test]
async fn slow_upstream_fails_with_timeout_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "e1"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut config = common::test_config(&server.uri());
    config.upstream.timeout_ms = 50;
    let client = SanctionsClient::new(&config).unwrap();

    let error = client.get_detail("e1").await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Timeout);
    assert!(error.message.contains("timed out"));
}

#[tokio::test]
async fn malformed_success_body_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server.uri());
    let error = client.search("acme").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::MalformedResponse);
    server.verify().await;
}

#[tokio::test]
async fn sparse_detail_document_gets_documented_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity/e1"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "e1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server.uri());
    let detail = client.get_detail("e1").await.unwrap();

    assert_eq!(detail.entity_id, "e1");
    assert_eq!(detail.full_name, "Unknown Entity");
    assert!(detail.aliases.is_empty());
    assert!(detail.sanctions.is_empty());
    assert_eq!(detail.date_of_birth, None);
    assert_eq!(detail.match_score, None);
    assert_eq!(detail.risk_level, RiskLevel::Unknown);
    server.verify().await;
}

#[tokio::test]
async fn healthy_upstream_reports_connected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server.uri());
    let status = client.check_health().await;

    assert!(status.is_connected);
    assert!(status.last_checked.is_some());
    assert!(status.response_time_ms.is_some());
    assert_eq!(status.error_message, None);
    server.verify().await;
}

#[tokio::test]
async fn health_check_timeout_reports_disconnected_after_three_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .expect(3)
        .mount(&server)
        .await;

    let mut config = common::test_config(&server.uri());
    config.upstream.timeout_ms = 50;
    let client = SanctionsClient::new(&config).unwrap();

    let status = client.check_health().await;

    assert!(!status.is_connected);
    assert!(status.error_message.unwrap().contains("timed out"));
    assert!(status.last_checked.is_some());
    // Three timed-out attempts plus two backoff waits.
    assert!(status.response_time_ms.unwrap() >= 150);
    server.verify().await;
}

#[tokio::test]
async fn unreachable_upstream_reports_a_network_error() {
    // Bind-then-drop guarantees nothing listens on the port.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = common::test_client(&format!("http://{addr}"));
    let error = client.search("acme").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::NetworkError);
    assert!(error.message.starts_with("network error:"));
}
