//! Screening service client.
//!
//! # Responsibilities
//! - Expose the three upstream operations: health check, search, detail
//! - Compose retry → execute → classify → normalize for each of them
//! - Health checks resolve to a status value, never an error

use std::time::Instant;

use reqwest::Method;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::executor::{RawResponse, RequestExecutor};
use crate::api::normalize::{self, RawDetail, RawSearchResponse};
use crate::api::retry::RetryPolicy;
use crate::api::types::{EntityDetail, SearchResultEntity};
use crate::config::AppConfig;
use crate::health::ApiStatus;
use crate::observability::metrics;

const HEALTH_ENDPOINT: &str = "/health";
const SEARCH_ENDPOINT: &str = "/search";
const SEARCH_LIMIT: u32 = 50;
const SEARCH_OFFSET: u32 = 0;

/// Typed, retrying access to the screening service.
///
/// Stateless apart from its connection pool; a single instance is shared
/// via `Arc` and calls for different arguments may be in flight
/// concurrently.
#[derive(Debug)]
pub struct SanctionsClient {
    executor: RequestExecutor,
    retry: RetryPolicy,
}

impl SanctionsClient {
    /// Build a client from validated configuration.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Ok(Self {
            executor: RequestExecutor::new(&config.upstream)?,
            retry: RetryPolicy::from_config(&config.retry),
        })
    }

    /// Probe upstream reachability.
    ///
    /// Always resolves to a status snapshot; failures are carried in
    /// `error_message`, not raised. Elapsed time covers the whole retried
    /// call, matching what an operator actually waited.
    pub async fn check_health(&self) -> ApiStatus {
        let started = Instant::now();
        let outcome = self.operation(HEALTH_ENDPOINT, &[]).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let status = match outcome {
            Ok(_) => ApiStatus::connected(elapsed_ms),
            Err(error) => {
                tracing::warn!(error = %error, "health check failed");
                ApiStatus::disconnected(elapsed_ms, error.message)
            }
        };
        metrics::record_api_health(status.is_connected);
        status
    }

    /// Search the watchlist by entity name.
    ///
    /// Recording the query in the search history is the caller's job.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResultEntity>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::invalid_input(
                "search query must not be empty",
                SEARCH_ENDPOINT,
            ));
        }

        let params = [
            ("query", query.to_string()),
            ("limit", SEARCH_LIMIT.to_string()),
            ("offset", SEARCH_OFFSET.to_string()),
        ];

        let value = self.operation(SEARCH_ENDPOINT, &params).await?;
        let raw: RawSearchResponse = serde_json::from_value(value).map_err(|e| {
            ApiError::malformed(format!("unexpected search response shape: {e}"), SEARCH_ENDPOINT)
        })?;

        let results: Vec<SearchResultEntity> = raw
            .results
            .iter()
            .enumerate()
            .map(|(index, hit)| normalize::normalize_search_hit(hit, index))
            .collect();

        tracing::info!(query, results = results.len(), "search completed");
        Ok(results)
    }

    /// Fetch the full record for one entity.
    pub async fn get_detail(&self, entity_id: &str) -> Result<EntityDetail, ApiError> {
        let entity_id = entity_id.trim();
        if entity_id.is_empty() {
            return Err(ApiError::invalid_input("entity id must not be empty", "/entity"));
        }

        let endpoint = format!("/entity/{entity_id}");
        let value = self.operation(&endpoint, &[]).await?;
        let raw: RawDetail = serde_json::from_value(value).map_err(|e| {
            ApiError::malformed(format!("unexpected detail response shape: {e}"), &endpoint)
        })?;

        Ok(normalize::normalize_detail(&raw, entity_id))
    }

    /// One retried JSON operation with request metrics.
    async fn operation(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let started = Instant::now();
        let result = self.retry.run(|| self.fetch_json(endpoint, query)).await;
        metrics::record_upstream_request(endpoint_label(endpoint), result.is_ok(), started.elapsed());
        result
    }

    /// One attempt: execute, classify the status, parse the body.
    async fn fetch_json(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let raw = self
            .executor
            .execute(endpoint, Method::GET, None, query)
            .await?;
        response_to_json(&raw, endpoint)
    }
}

/// Classify the response status and defensively parse the body.
fn response_to_json(raw: &RawResponse, endpoint: &str) -> Result<Value, ApiError> {
    if !(200..300).contains(&raw.status) {
        return Err(ApiError::from_status(raw.status, &raw.body, endpoint));
    }

    let value: Value = serde_json::from_str(&raw.body)
        .map_err(|_| ApiError::malformed("response body is not valid JSON", endpoint))?;
    if !value.is_object() {
        return Err(ApiError::malformed("response body is not a JSON object", endpoint));
    }
    Ok(value)
}

/// Low-cardinality endpoint label for metrics.
fn endpoint_label(endpoint: &str) -> &'static str {
    if endpoint.starts_with("/entity") {
        "entity"
    } else if endpoint.starts_with(SEARCH_ENDPOINT) {
        "search"
    } else {
        "health"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorKind;

    fn client() -> SanctionsClient {
        let mut config = AppConfig::default();
        config.upstream.api_key = "test-key".to_string();
        SanctionsClient::new(&config).unwrap()
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: reqwest::header::HeaderMap::new(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_query_is_rejected_locally() {
        let error = client().search("   ").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::ClientError);
    }

    #[tokio::test]
    async fn empty_entity_id_is_rejected_locally() {
        let error = client().get_detail("").await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::ClientError);
    }

    #[test]
    fn success_body_must_be_a_json_object() {
        assert!(response_to_json(&raw(200, r#"{"ok":true}"#), "/health").is_ok());

        let error = response_to_json(&raw(200, "[]"), "/health").unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedResponse);

        let error = response_to_json(&raw(200, "not json"), "/health").unwrap_err();
        assert_eq!(error.kind, ErrorKind::MalformedResponse);
    }

    #[test]
    fn non_success_status_is_classified() {
        let error = response_to_json(&raw(429, ""), "/search").unwrap_err();
        assert_eq!(error.kind, ErrorKind::RateLimited);
        assert_eq!(error.http_status, Some(429));
    }
}
