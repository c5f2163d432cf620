//! Lifecycle harness for long-running tasks.
//!
//! A [`Service`] exposes the three hooks a supervised task needs: one-time
//! setup, a main loop that blocks until terminated, and teardown. The
//! harness converts SIGINT, SIGTERM and SIGHUP into a shutdown signal and
//! guarantees `close` runs before the harness returns, whether the loop
//! ended on its own or was asked to stop.

use anyhow::Result;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::watch;

/// A long-running task managed by the harness.
pub trait Service {
    /// One-time setup before the main loop starts.
    ///
    /// # Errors
    ///
    /// A failure here aborts start-up; the main loop never runs and
    /// `close` is not called.
    fn init(&mut self) -> Result<()>;

    /// The main loop. Expected to watch `shutdown` and return promptly
    /// once it fires; the harness also races the loop against the signal
    /// for services that cannot.
    fn run(
        &mut self,
        shutdown: watch::Receiver<()>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Release resources. Runs exactly once after the main loop ends.
    fn close(&mut self);
}

/// Drive `service` through its lifecycle until `shutdown` fires or the
/// main loop returns.
///
/// # Errors
///
/// Propagates failures from `init` and the main loop. `close` runs on
/// every path where `init` succeeded.
pub async fn supervise<S: Service>(mut service: S, mut shutdown: watch::Receiver<()>) -> Result<()> {
    service.init()?;
    let result = {
        let run = service.run(shutdown.clone());
        tokio::pin!(run);
        tokio::select! {
            res = &mut run => res,
            _ = shutdown.changed() => Ok(()),
        }
    };
    service.close();
    result
}

/// Convert SIGINT, SIGTERM and SIGHUP into a shutdown signal.
///
/// A handler that cannot be installed triggers an immediate shutdown
/// rather than leaving the daemon unkillable.
pub fn spawn_signal_listener(shutdown_tx: watch::Sender<()>) {
    tokio::spawn(async move {
        let installed = (
            install(SignalKind::interrupt(), "SIGINT", &shutdown_tx),
            install(SignalKind::terminate(), "SIGTERM", &shutdown_tx),
            install(SignalKind::hangup(), "SIGHUP", &shutdown_tx),
        );
        let (Some(mut sigint), Some(mut sigterm), Some(mut sighup)) = installed else {
            return;
        };

        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
            _ = sighup.recv() => {}
        }
        let _ = shutdown_tx.send(());
    });
}

fn install(
    kind: SignalKind,
    name: &str,
    shutdown_tx: &watch::Sender<()>,
) -> Option<tokio::signal::unix::Signal> {
    match signal(kind) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install {name} handler");
            let _ = shutdown_tx.send(());
            None
        }
    }
}

/// Run `service` under signal-driven shutdown.
///
/// # Errors
///
/// Propagates failures from the service lifecycle.
pub async fn run<S: Service>(service: S) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    spawn_signal_listener(shutdown_tx);
    supervise(service, shutdown_rx).await
}
