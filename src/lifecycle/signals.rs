//! Reload signal handling.
//!
//! # Responsibilities
//! - Translate SIGHUP into reload requests
//! - Run the background loop that feeds reload requests to the coordinator
//!
//! # Design Decisions
//! - The listener has no reload logic of its own; it calls the same
//!   coordinator the HTTP handler does, so both share one gate
//! - A reload in progress is finished before the loop notices shutdown

use tokio::sync::mpsc;

use crate::data::ReloadCoordinator;
use crate::lifecycle::shutdown::ShutdownSignal;

/// Forward every SIGHUP into `reload_tx` until shutdown.
#[cfg(unix)]
pub fn forward_hangup(
    reload_tx: mpsc::Sender<()>,
    mut shutdown: ShutdownSignal,
) -> std::io::Result<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                received = hangup.recv() => {
                    if received.is_none() || reload_tx.send(()).await.is_err() {
                        break;
                    }
                }
                _ = shutdown.recv() => break,
            }
        }
    }))
}

/// Listen for reload requests and run them through the coordinator.
///
/// Returns when shutdown is triggered or every sender is dropped.
pub async fn watch_reload(
    coordinator: ReloadCoordinator,
    mut reload_rx: mpsc::Receiver<()>,
    mut shutdown: ShutdownSignal,
) {
    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Reload listener received shutdown signal, exiting loop");
                break;
            }
            request = reload_rx.recv() => {
                if request.is_none() {
                    break;
                }
                tracing::info!("reload requested");
                match coordinator.reload().await {
                    Ok(count) => tracing::info!(count, "reload completed"),
                    Err(e) => tracing::error!(error = %e, "reload failed"),
                }
            }
        }
    }
}
