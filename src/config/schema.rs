//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults mirror the production constants of the upstream screening API.

use serde::{Deserialize, Serialize};

/// Root configuration for the screening client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream screening service settings.
    pub upstream: UpstreamConfig,

    /// Retry policy settings.
    pub retry: RetryConfig,

    /// Connection monitor settings.
    pub monitor: MonitorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Upstream screening service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the screening API, including version prefix.
    pub base_url: String,

    /// API key sent on every request (`x-api-key` header).
    pub api_key: String,

    /// Hard per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sanctions-check.com/v1".to_string(),
            api_key: String::new(),
            timeout_ms: 10_000,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per operation (first try included).
    pub max_attempts: u32,

    /// Base delay for linear backoff in milliseconds.
    /// The wait before attempt n+1 is `base_delay_ms * n`.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
        }
    }
}

/// Connection monitor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Enable the periodic connection monitor.
    pub enabled: bool,

    /// Interval between health checks in seconds.
    pub interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint (long-running mode only).
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
