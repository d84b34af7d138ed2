use std::sync::Arc;

use atelier_ai::NarrativeGenerator;
use atelier_sync::SyncCoordinator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Owner of all published content and the only writer to it.
    pub coordinator: Arc<SyncCoordinator>,
    /// Server configuration (admin PIN, timeouts).
    pub config: Arc<ServerConfig>,
    /// Text-generation client; `None` when no credentials are configured.
    pub generator: Option<Arc<NarrativeGenerator>>,
}
