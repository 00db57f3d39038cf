//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; fields over message interpolation
//! - Metric updates are cheap (atomics behind the metrics facade)
//! - The Prometheus endpoint only runs in long-lived monitor mode

pub mod logging;
pub mod metrics;
