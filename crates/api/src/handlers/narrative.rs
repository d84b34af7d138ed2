//! Handler for the AI-assisted narrative tool.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use atelier_core::types::Language;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRequest {
    pub prompt: String,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NarrativeResponse {
    pub text: String,
}

/// POST /api/v1/narrative
///
/// Draft a project description from a short concept brief. Returns 503
/// when no text-generation credentials are configured.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<NarrativeRequest>,
) -> AppResult<impl IntoResponse> {
    let generator = state.generator.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Text generation is not configured".to_string())
    })?;

    let brief = request.prompt.trim();
    if brief.is_empty() {
        return Err(AppError::BadRequest("Prompt must not be empty".to_string()));
    }

    let lang = request
        .lang
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_default();

    let text = generator.generate(brief, lang).await?;

    tracing::info!(lang = %lang, "Narrative generated");
    Ok(Json(DataResponse {
        data: NarrativeResponse { text },
    }))
}
