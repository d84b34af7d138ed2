//! Handlers for the PIN-gated content-management surface.
//!
//! Every handler takes [`RequireAdmin`] first, validates input where the
//! domain requires it, and delegates to the coordinator. A remote-store
//! failure surfaces as an error response here; nothing is optimistically
//! written on a failed remote write.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use atelier_core::content::{self, AboutInfo, ContactInfo, Project, ThemeConfig};

use crate::error::AppResult;
use crate::pin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Studio singletons
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/about
pub async fn save_about(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(about): Json<AboutInfo>,
) -> AppResult<impl IntoResponse> {
    state.coordinator.save_about(about.clone()).await?;

    tracing::info!("About singleton updated");
    Ok(Json(DataResponse { data: about }))
}

/// PUT /api/v1/admin/contact
pub async fn save_contact(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(contact): Json<ContactInfo>,
) -> AppResult<impl IntoResponse> {
    state.coordinator.save_contact(contact.clone()).await?;

    tracing::info!("Contact singleton updated");
    Ok(Json(DataResponse { data: contact }))
}

/// PUT /api/v1/admin/theme
pub async fn save_theme(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(theme): Json<ThemeConfig>,
) -> AppResult<impl IntoResponse> {
    state.coordinator.save_theme(theme.clone()).await?;

    tracing::info!(serif = %theme.serif, sans = %theme.sans, "Theme updated");
    Ok(Json(DataResponse { data: theme }))
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/projects
///
/// Create a new project. The body's id is ignored; the store assigns one.
pub async fn create_project(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(mut project): Json<Project>,
) -> AppResult<impl IntoResponse> {
    content::validate_project(&project)?;
    project.id = String::new();

    let stored = state.coordinator.save_project(project).await?;

    tracing::info!(id = %stored.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Overwrite an existing project's document.
pub async fn update_project(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut project): Json<Project>,
) -> AppResult<impl IntoResponse> {
    content::validate_project(&project)?;
    project.id = id;

    let stored = state.coordinator.save_project(project).await?;

    tracing::info!(id = %stored.id, "Project updated");
    Ok(Json(DataResponse { data: stored }))
}

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete_project(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.coordinator.delete_project(&id).await?;

    tracing::info!(id = %id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
