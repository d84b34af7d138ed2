//! Shared helpers for the API integration tests.
//!
//! Builds the full application router (same middleware stack as
//! production) over an offline coordinator backed by a temporary
//! snapshot directory, so every suite exercises exactly what the binary
//! runs without needing any external service.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_store::LocalStore;
use atelier_sync::SyncCoordinator;

/// The PIN the test configuration accepts.
pub const TEST_PIN: &str = "2025";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_pin: TEST_PIN.to_string(),
        data_dir: data_dir.to_path_buf(),
    }
}

/// Build the full application router over an offline coordinator rooted
/// at `data_dir`. Clone the returned router for each request; clones
/// share the same coordinator state.
pub fn build_test_app(data_dir: &Path) -> Router {
    let config = test_config(data_dir);
    let local = LocalStore::open(&config.data_dir).expect("open local store");
    let coordinator = Arc::new(SyncCoordinator::new(local, None));

    let state = AppState {
        coordinator,
        config: Arc::new(config.clone()),
        generator: None,
    };

    build_app_router(state, &config)
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a request with a JSON body, optionally carrying the admin PIN.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    pin: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(pin) = pin {
        builder = builder.header("x-admin-pin", pin);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a DELETE request, optionally carrying the admin PIN.
pub async fn delete(app: Router, uri: &str, pin: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if let Some(pin) = pin {
        builder = builder.header("x-admin-pin", pin);
    }
    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
