//! Connection health subsystem.
//!
//! # Data Flow
//! ```text
//! Periodic checks (monitor.rs):
//!     30s ticker → SanctionsClient::check_health
//!     → new ApiStatus snapshot
//!     → atomic swap, observers read the latest at any time
//!
//! Manual re-check:
//!     check_now() → same path, ticker untouched
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable and replaced wholesale, never patched
//! - One recurring timer; teardown only via the shutdown channel
//! - Health failures are data (error_message), not errors

pub mod monitor;
pub mod status;

pub use monitor::ConnectionMonitor;
pub use status::ApiStatus;
