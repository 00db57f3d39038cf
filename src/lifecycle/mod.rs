//! Lifecycle management subsystem.
//!
//! # Design Decisions
//! - All long-running tasks subscribe to one broadcast shutdown channel
//! - Ctrl-C feeds the same path as programmatic teardown

pub mod shutdown;

pub use shutdown::Shutdown;
