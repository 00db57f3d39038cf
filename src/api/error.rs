//! Upstream failure taxonomy and classification.
//!
//! # Responsibilities
//! - Map raw failures (status codes, transport errors, timeouts) to a
//!   closed set of error kinds
//! - Decide retryability per kind
//! - Derive stable human-readable messages from status codes

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// 4xx other than 429: the request itself is wrong, retrying cannot help.
    ClientError,
    /// HTTP 429.
    RateLimited,
    /// 5xx (and any status outside the expected ranges).
    ServerError,
    /// The attempt exceeded its wall-clock deadline.
    Timeout,
    /// Transport-level failure: DNS, TLS, connection refused.
    NetworkError,
    /// 2xx response whose body failed schema validation.
    MalformedResponse,
}

impl ErrorKind {
    /// Whether the retry policy may re-issue the failed operation.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::NetworkError
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::ServerError
        )
    }
}

/// A classified upstream failure, surfaced to callers as-is.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub http_status: Option<u16>,
    pub endpoint: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        http_status: Option<u16>,
        endpoint: &str,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status,
            endpoint: endpoint.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Classify a non-2xx response.
    ///
    /// The body is read defensively: a JSON object with a string `message`
    /// overrides the fixed text for 400 and unmapped codes only.
    pub fn from_status(status: u16, body: &str, endpoint: &str) -> Self {
        Self::new(
            status_kind(status),
            status_message(status, body),
            Some(status),
            endpoint,
        )
    }

    /// A transport-level failure before any response arrived.
    pub fn network(detail: impl std::fmt::Display, endpoint: &str) -> Self {
        Self::new(
            ErrorKind::NetworkError,
            format!("network error: {detail}"),
            None,
            endpoint,
        )
    }

    /// The attempt exceeded its deadline.
    pub fn timeout(after: std::time::Duration, endpoint: &str) -> Self {
        Self::new(
            ErrorKind::Timeout,
            format!("request timed out after {}ms", after.as_millis()),
            None,
            endpoint,
        )
    }

    /// A 2xx response whose body failed schema validation.
    pub fn malformed(detail: impl std::fmt::Display, endpoint: &str) -> Self {
        Self::new(
            ErrorKind::MalformedResponse,
            format!("malformed response: {detail}"),
            None,
            endpoint,
        )
    }

    /// A locally rejected input; same contract as an upstream 400.
    pub fn invalid_input(detail: impl Into<String>, endpoint: &str) -> Self {
        Self::new(ErrorKind::ClientError, detail, None, endpoint)
    }
}

fn status_kind(status: u16) -> ErrorKind {
    match status {
        429 => ErrorKind::RateLimited,
        400..=499 => ErrorKind::ClientError,
        // Anything unexpected (1xx/3xx leaking through redirect handling)
        // is treated like a server fault and stays retryable.
        _ => ErrorKind::ServerError,
    }
}

fn status_message(status: u16, body: &str) -> String {
    match status {
        400 => body_message(body).unwrap_or_else(|| "invalid request parameters".to_string()),
        401 => "authentication failed".to_string(),
        403 => "access forbidden".to_string(),
        404 => "endpoint not found".to_string(),
        429 => "rate limit exceeded".to_string(),
        500..=599 => "service temporarily unavailable".to_string(),
        _ => body_message(body).unwrap_or_else(|| match reason_phrase(status) {
            Some(reason) => format!("HTTP {status}: {reason}"),
            None => format!("HTTP {status}"),
        }),
    }
}

/// `message` field of a JSON error body, if there is one.
fn body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

fn reason_phrase(status: u16) -> Option<&'static str> {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
}
