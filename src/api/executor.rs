//! Single-attempt HTTP execution.
//!
//! # Responsibilities
//! - Issue exactly one upstream request per call; no state between calls
//! - Enforce the hard wall-clock deadline via a timer-cancelled token
//! - Return received responses raw; classification happens elsewhere
//!
//! # Design Decisions
//! - The deadline races the whole attempt (connect, send, read body); when
//!   the token fires the request future is dropped, aborting the in-flight
//!   call exactly once
//! - Transport failures (DNS, TLS, refused) surface as `NetworkError` with
//!   the underlying message attached

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use tokio_util::sync::CancellationToken;
use url::Url;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::config::UpstreamConfig;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// An upstream response exactly as received.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: reqwest::header::HeaderMap,
    pub body: String,
}

/// Issues one timed, cancellable HTTP call per `execute`.
pub struct RequestExecutor {
    http: Client,
    base_url: Url,
    api_key: String,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::invalid_input(format!("invalid base URL: {e}"), "/"))?;

        // No reqwest-level timeout: the executor's own timer is the single
        // source of truth for the per-attempt deadline.
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::network(format!("failed to build HTTP client: {e}"), "/"))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Execute one request against `endpoint` (path relative to the base
    /// URL). Returns the raw response or a classified transport failure.
    pub async fn execute(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<serde_json::Value>,
        query: &[(&str, String)],
    ) -> Result<RawResponse, ApiError> {
        let url = self.endpoint_url(endpoint)?;
        let request_id = Uuid::new_v4();

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!(%request_id, %method, endpoint, "issuing upstream request");

        let cancel = CancellationToken::new();
        let timer = {
            let cancel = cancel.clone();
            let deadline = self.timeout;
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                cancel.cancel();
            })
        };

        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::warn!(
                    %request_id,
                    endpoint,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "upstream request timed out"
                );
                Err(ApiError::timeout(self.timeout, endpoint))
            }
            received = Self::perform(request) => match received {
                Ok(raw) => {
                    tracing::debug!(%request_id, status = raw.status, "upstream response received");
                    Ok(raw)
                }
                Err(e) => {
                    tracing::warn!(%request_id, endpoint, error = %e, "upstream transport failure");
                    Err(ApiError::network(e, endpoint))
                }
            }
        };

        timer.abort();
        outcome
    }

    async fn perform(request: reqwest::RequestBuilder) -> Result<RawResponse, reqwest::Error> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    /// Concatenate the endpoint path onto the base URL, preserving any
    /// version prefix in the base path.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint
        );
        Url::parse(&joined)
            .map_err(|e| ApiError::invalid_input(format!("invalid endpoint: {e}"), endpoint))
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_ms", &self.timeout.as_millis())
            .finish()
    }
}
