//! Resilient access layer for an external sanctions screening service.
//!
//! # Architecture Overview
//!
//! ```text
//! operator command
//!     → SanctionsClient (api/client.rs)
//!         → RetryPolicy (api/retry.rs)
//!             → RequestExecutor (api/executor.rs) ──── upstream HTTP
//!         → classification on failure (api/error.rs)
//!         → normalization on success (api/normalize.rs)
//!     → SearchHistoryStore records the query (history/)
//!
//! ConnectionMonitor (health/) shares check_health on a fixed interval
//! and publishes ApiStatus snapshots to any observer.
//! ```

pub mod api;
pub mod config;
pub mod health;
pub mod history;
pub mod lifecycle;
pub mod observability;

pub use api::client::SanctionsClient;
pub use api::error::{ApiError, ErrorKind};
pub use api::types::{EntityDetail, RiskLevel, SanctionsListing, SearchResultEntity};
pub use config::AppConfig;
pub use health::{ApiStatus, ConnectionMonitor};
pub use history::{InMemorySession, SearchHistoryEntry, SearchHistoryStore};
pub use lifecycle::Shutdown;
