//! Visitor reviews: constants, validation, and rating aggregation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Language, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A stored review, either embedded in a seed project or a document in the
/// `comments` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    pub user_name: String,
    pub rating: u8,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// A review as submitted from the project page, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    /// Optional; blank falls back to a per-language "Visitor" label.
    #[serde(default)]
    pub user_name: String,
    /// Stars. `0` means the visitor never picked a star, which makes the
    /// submission incomplete.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub text: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a submitted review: rating must be an integer in 1..=5 and the
/// text must be non-blank. Rejection happens before any write is attempted.
pub fn validate_review(review: &NewReview) -> Result<(), CoreError> {
    if review.rating < MIN_RATING || review.rating > MAX_RATING {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING} stars"
        )));
    }
    if review.text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Review text must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// The name shown for a visitor who left the name field blank.
pub fn default_visitor_name(lang: Language) -> &'static str {
    match lang {
        Language::En => "Visitor",
        Language::Ar => "زائر",
        Language::Tr => "Ziyaretçi",
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Average star rating rounded to one decimal, `0.0` with no reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let avg = f64::from(total) / reviews.len() as f64;
    (avg * 10.0).round() / 10.0
}

/// Sort reviews newest first. Reviews without a timestamp (older local
/// submissions) sink to the end.
pub fn sort_newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
