//! Background watcher that keeps content in step with the remote store.
//!
//! [`ContentWatcher`] polls the `projects` and `general` collections and
//! hands each snapshot to the coordinator, which replaces state and
//! writes through to the local store. A failed poll is logged and
//! skipped: the stream simply stalls and the last known state stays
//! authoritative until the next tick succeeds. The loop exits when the
//! provided [`CancellationToken`] is cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use atelier_store::remote::{COLLECTION_GENERAL, COLLECTION_PROJECTS};

use crate::coordinator::SyncCoordinator;

/// How often the watcher polls the remote collections.
const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Background service that mirrors remote snapshots into the coordinator.
pub struct ContentWatcher {
    coordinator: Arc<SyncCoordinator>,
}

impl ContentWatcher {
    /// Spawn the watcher task.
    ///
    /// Returns `None` without spawning anything when the coordinator is
    /// offline; there is nothing to watch.
    pub fn spawn(
        coordinator: Arc<SyncCoordinator>,
        cancel: CancellationToken,
    ) -> Option<tokio::task::JoinHandle<()>> {
        coordinator.remote()?;
        let watcher = Self { coordinator };
        Some(tokio::spawn(watcher.run(cancel)))
    }

    /// Run the poll loop. The first tick fires immediately so a freshly
    /// started server converges on remote content without waiting a full
    /// interval.
    async fn run(self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(POLL_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Content watcher cancelled");
                    break;
                }
                _ = interval.tick() => {
                    self.poll().await;
                }
            }
        }
    }

    /// Fetch both collections and apply whatever succeeds. Each fetch
    /// failure is logged independently; one collection stalling must not
    /// stall the other.
    async fn poll(&self) {
        let Some(remote) = self.coordinator.remote() else {
            return;
        };

        match remote.list(COLLECTION_PROJECTS).await {
            Ok(documents) => self.coordinator.apply_projects_snapshot(documents).await,
            Err(e) => {
                tracing::warn!(error = %e, "Projects poll failed, keeping last known state");
            }
        }

        match remote.list(COLLECTION_GENERAL).await {
            Ok(documents) => self.coordinator.apply_general_snapshot(documents).await,
            Err(e) => {
                tracing::warn!(error = %e, "General poll failed, keeping last known state");
            }
        }
    }
}
