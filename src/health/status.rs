//! Connection status snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of the most recent upstream health check.
///
/// Immutable once built; the monitor publishes a fresh snapshot per check.
/// `is_connected` is true iff the last check completed successfully within
/// its timeout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    pub is_connected: bool,
    pub last_checked: Option<DateTime<Utc>>,
    pub response_time_ms: Option<u64>,
    pub error_message: Option<String>,
}

impl ApiStatus {
    /// Initial snapshot, before any check has completed.
    pub fn unknown() -> Self {
        Self {
            is_connected: false,
            last_checked: None,
            response_time_ms: None,
            error_message: None,
        }
    }

    pub fn connected(response_time_ms: u64) -> Self {
        Self {
            is_connected: true,
            last_checked: Some(Utc::now()),
            response_time_ms: Some(response_time_ms),
            error_message: None,
        }
    }

    pub fn disconnected(response_time_ms: u64, message: impl Into<String>) -> Self {
        Self {
            is_connected: false,
            last_checked: Some(Utc::now()),
            response_time_ms: Some(response_time_ms),
            error_message: Some(message.into()),
        }
    }
}

impl Default for ApiStatus {
    fn default() -> Self {
        Self::unknown()
    }
}
