use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_ai::{GeminiConfig, NarrativeGenerator};
use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_store::{DocumentStore, FirestoreConfig, FirestoreStore, LocalStore};
use atelier_sync::{ContentWatcher, SyncCoordinator};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_api=debug,atelier_sync=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Local snapshot store ---
    let local = LocalStore::open(&config.data_dir).expect("Failed to open local snapshot store");
    tracing::info!(dir = %local.dir().display(), "Local snapshot store opened");

    // --- Remote document store (optional) ---
    let remote: Option<Arc<dyn DocumentStore>> = match FirestoreConfig::from_env() {
        Some(firestore) => {
            tracing::info!(project_id = %firestore.project_id, "Remote document store configured");
            Some(Arc::new(FirestoreStore::new(firestore)))
        }
        None => {
            tracing::info!("No document store credentials, running in local-only mode");
            None
        }
    };

    // --- Sync coordinator + content watcher ---
    let coordinator = Arc::new(SyncCoordinator::new(local, remote));
    let watcher_cancel = tokio_util::sync::CancellationToken::new();
    let watcher_handle = ContentWatcher::spawn(Arc::clone(&coordinator), watcher_cancel.clone());
    if watcher_handle.is_some() {
        tracing::info!("Content watcher started");
    }

    // --- Narrative generator (optional) ---
    let generator = match GeminiConfig::from_env() {
        Some(gemini) => {
            tracing::info!(model = %gemini.model, "Narrative generator configured");
            Some(Arc::new(NarrativeGenerator::new(gemini)))
        }
        None => {
            tracing::info!("No text-generation credentials, narrative tool disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        coordinator,
        config: Arc::new(config.clone()),
        generator,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    watcher_cancel.cancel();
    if let Some(handle) = watcher_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Content watcher stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
