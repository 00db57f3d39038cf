//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, attempts >= 1)
//! - Check the base URL actually parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("upstream.api_key must not be empty (set SANCTIONS_API_KEY)")]
    MissingApiKey,

    #[error("upstream.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("retry.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("monitor.interval_secs must be greater than zero")]
    ZeroMonitorInterval,

    #[error("observability.metrics_address is not a valid socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = Url::parse(&config.upstream.base_url) {
        errors.push(ValidationError::InvalidBaseUrl(e.to_string()));
    }

    if config.upstream.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if config.upstream.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.retry.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }

    if config.monitor.interval_secs == 0 {
        errors.push(ValidationError::ZeroMonitorInterval);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
