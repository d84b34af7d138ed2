//! Handlers for the public content surface: the gallery, a project's
//! full document, and the studio singletons.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use atelier_core::content::Project;
use atelier_core::error::CoreError;
use atelier_core::types::Language;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// `?lang=` query parameter shared by the localized endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

impl LangQuery {
    pub fn language(&self) -> Language {
        self.lang
            .as_deref()
            .map(Language::from_code)
            .unwrap_or_default()
    }
}

/// A gallery card: one project with its text resolved into a single
/// language.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub year: String,
    pub location: String,
    pub cover_image: String,
}

impl ProjectCard {
    fn resolve(project: &Project, lang: Language) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.resolve(lang).to_string(),
            category: project.category.resolve(lang).to_string(),
            description: project.description.resolve(lang).to_string(),
            year: project.year.clone(),
            location: project.location.clone(),
            cover_image: project.cover_image.clone(),
        }
    }
}

/// GET /api/v1/projects?lang=
///
/// The gallery listing, resolved into the requested language (default
/// English). A project missing a translation degrades to English or its
/// legacy plain text, never to an error.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> AppResult<Json<DataResponse<Vec<ProjectCard>>>> {
    let lang = query.language();
    let cards = state
        .coordinator
        .projects()
        .await
        .iter()
        .map(|p| ProjectCard::resolve(p, lang))
        .collect();

    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/projects/{id}
///
/// The full project document with every language variant, for the detail
/// view (which resolves per field client-side).
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = state.coordinator.project(&id).await.ok_or_else(|| {
        CoreError::NotFound {
            entity: "project",
            id,
        }
    })?;

    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/about
pub async fn get_about(State(state): State<AppState>) -> AppResult<impl axum::response::IntoResponse> {
    let about = state.coordinator.about().await;
    Ok(Json(DataResponse { data: about }))
}

/// GET /api/v1/contact
pub async fn get_contact(
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    let contact = state.coordinator.contact().await;
    Ok(Json(DataResponse { data: contact }))
}

/// GET /api/v1/theme
pub async fn get_theme(State(state): State<AppState>) -> AppResult<impl axum::response::IntoResponse> {
    let theme = state.coordinator.theme().await;
    Ok(Json(DataResponse { data: theme }))
}
