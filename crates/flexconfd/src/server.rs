//! The illustrative heartbeat server.
//!
//! A placeholder long-running task: it sleeps for the configured interval
//! and logs each tick until told to stop. It exists to give the lifecycle
//! harness something to drive, not to do useful work.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;

use crate::service::Service;

/// A stub service that ticks and logs until shutdown.
#[derive(Debug)]
pub struct Heartbeat {
    interval: Duration,
    ticks: u64,
}

impl Heartbeat {
    /// Create a heartbeat ticking every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, ticks: 0 }
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Service for Heartbeat {
    fn init(&mut self) -> Result<()> {
        tracing::info!("module setup");
        Ok(())
    }

    async fn run(&mut self, mut shutdown: watch::Receiver<()>) -> Result<()> {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.changed() => break,
            }
            self.ticks += 1;
            tracing::info!(ticks = self.ticks, "executing");
            tracing::debug!("tick complete");
        }
        Ok(())
    }

    fn close(&mut self) {
        tracing::info!(ticks = self.ticks, "terminating");
    }
}
