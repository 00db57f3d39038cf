//! Shared helpers for integration tests.

use sanctions_client::{AppConfig, SanctionsClient};

/// Config pointed at a mock upstream, with test-friendly timings.
pub fn test_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.upstream.base_url = base_url.to_string();
    config.upstream.api_key = "test-key".to_string();
    config.upstream.timeout_ms = 200;
    config.retry.base_delay_ms = 20;
    config
}

/// Client built from [`test_config`].
pub fn test_client(base_url: &str) -> SanctionsClient {
    SanctionsClient::new(&test_config(base_url)).unwrap()
}
