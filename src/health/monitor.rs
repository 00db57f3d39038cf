//! Periodic connection monitoring.
//!
//! # Responsibilities
//! - Drive the client's health check on a fixed interval
//! - Publish the latest status as an immutable snapshot
//! - Support manual re-checks without disturbing the schedule

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::broadcast;
use tokio::time;

use crate::api::client::SanctionsClient;
use crate::config::MonitorConfig;
use crate::health::status::ApiStatus;

/// Shares the client's health check on a recurring timer and exposes the
/// result to any number of observers.
///
/// Cloning is cheap; clones observe and publish the same snapshot.
#[derive(Clone)]
pub struct ConnectionMonitor {
    client: Arc<SanctionsClient>,
    status: Arc<ArcSwap<ApiStatus>>,
    interval: Duration,
}

impl ConnectionMonitor {
    pub fn new(client: Arc<SanctionsClient>, config: &MonitorConfig) -> Self {
        Self {
            client,
            status: Arc::new(ArcSwap::from_pointee(ApiStatus::unknown())),
            interval: Duration::from_secs(config.interval_secs),
        }
    }

    /// Latest status snapshot.
    pub fn status(&self) -> Arc<ApiStatus> {
        self.status.load_full()
    }

    /// Run one health check now and publish the result.
    ///
    /// Does not reset or restart the periodic schedule.
    pub async fn check_now(&self) -> Arc<ApiStatus> {
        let next = self.client.check_health().await;
        let previous = self.status.swap(Arc::new(next));
        let current = self.status.load_full();

        if previous.is_connected != current.is_connected {
            tracing::info!(
                connected = current.is_connected,
                error = current.error_message.as_deref().unwrap_or(""),
                "upstream connectivity changed"
            );
        }
        current
    }

    /// Drive the periodic schedule until the shutdown signal fires.
    ///
    /// The first tick fires immediately, so a status settles right after
    /// startup.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "connection monitor starting"
        );

        let mut ticker = time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.check_now().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("connection monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
