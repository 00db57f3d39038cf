//! Upstream API access layer.
//!
//! # Data Flow
//! ```text
//! client.rs operation
//!     → retry.rs (budget + linear backoff)
//!         → executor.rs (one timed, cancellable HTTP attempt)
//!     → error.rs (classify failures into the ApiError taxonomy)
//!     → normalize.rs (canonical entities from raw upstream JSON)
//! ```
//!
//! # Design Decisions
//! - Classification is pure; the executor returns responses uninterpreted
//! - Normalization is total: missing upstream fields become documented
//!   defaults, never errors
//! - One retry combinator is shared by every operation

pub mod client;
pub mod error;
pub mod executor;
pub mod normalize;
pub mod retry;
pub mod types;
