//! Configuration loading from disk and environment.

use std::env;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `upstream.api_key`.
pub const ENV_API_KEY: &str = "SANCTIONS_API_KEY";

/// Environment variable overriding `upstream.base_url`.
pub const ENV_BASE_URL: &str = "SANCTIONS_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied after parsing, so a config file does
/// not need to contain the API key.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    finish(config)
}

/// Build a configuration from defaults plus environment overrides.
///
/// Used when no config file is given on the command line.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    finish(AppConfig::default())
}

fn finish(mut config: AppConfig) -> Result<AppConfig, ConfigError> {
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(key) = env::var(ENV_API_KEY) {
        if !key.trim().is_empty() {
            config.upstream.api_key = key;
        }
    }
    if let Ok(url) = env::var(ENV_BASE_URL) {
        if !url.trim().is_empty() {
            config.upstream.base_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [upstream]
            api_key = "k"
            timeout_ms = 250

            [retry]
            max_attempts = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.timeout_ms, 250);
        assert_eq!(config.retry.max_attempts, 2);
        // Untouched sections keep their defaults.
        assert_eq!(config.monitor.interval_secs, 30);
    }
}
