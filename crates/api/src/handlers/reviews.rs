//! Handlers for visitor reviews: the public list-and-submit pair on the
//! project page and the PIN-gated moderation surface.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use atelier_core::review::{self, NewReview, Review};

use crate::error::AppResult;
use crate::handlers::content::LangQuery;
use crate::pin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Reviews of one project plus their aggregate, as the project page
/// renders them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsPayload {
    pub reviews: Vec<Review>,
    pub average_rating: f64,
}

/// GET /api/v1/projects/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let reviews = state.coordinator.reviews_for(&id).await;
    let average_rating = review::average_rating(&reviews);

    Ok(Json(DataResponse {
        data: ReviewsPayload {
            reviews,
            average_rating,
        },
    }))
}

/// POST /api/v1/projects/{id}/reviews?lang=
///
/// Submit a visitor review. Incomplete submissions (no stars, blank
/// text) are rejected with a validation error before anything is
/// written; a blank name becomes the per-language visitor label.
pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
    Json(submission): Json<NewReview>,
) -> AppResult<impl IntoResponse> {
    let stored = state
        .coordinator
        .submit_review(&id, submission, query.language())
        .await?;

    tracing::info!(project_id = %id, rating = stored.rating, "Review accepted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// Query parameters for review deletion. The project id locates the
/// per-project key when running without a remote store.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReviewQuery {
    #[serde(default)]
    pub project_id: String,
}

/// GET /api/v1/admin/reviews
pub async fn all_reviews(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reviews = state.coordinator.all_reviews().await?;

    Ok(Json(DataResponse { data: reviews }))
}

/// DELETE /api/v1/admin/reviews/{id}?projectId=
pub async fn delete_review(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteReviewQuery>,
) -> AppResult<impl IntoResponse> {
    state
        .coordinator
        .delete_review(&id, &query.project_id)
        .await?;

    tracing::info!(id = %id, "Review deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}
