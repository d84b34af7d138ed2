//! Client for the external text-generation service.
//!
//! The service is an opaque collaborator: one prompt in, freeform text
//! out. There is no retry policy; a failure is logged generically and
//! surfaced as [`AiError`] for the caller to report. Absent credentials
//! disable the feature rather than failing startup.

use serde_json::{json, Value};

use atelier_core::types::Language;

/// Model used when `GEMINI_MODEL` is not set.
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Text generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Text generation rejected: {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Text generation returned no text")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Credentials for the generation service.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

impl GeminiConfig {
    /// Read `GEMINI_API_KEY` (required) and `GEMINI_MODEL` (optional).
    ///
    /// Returns `None` when the key is unset or blank; the narrative
    /// endpoint then reports the feature as unavailable.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self { api_key, model })
    }
}

// ---------------------------------------------------------------------------
// NarrativeGenerator
// ---------------------------------------------------------------------------

/// Drafts design descriptions for the admin panel's narrative tool.
pub struct NarrativeGenerator {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl NarrativeGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Generate a short design description for `brief` in `lang`.
    pub async fn generate(&self, brief: &str, lang: Language) -> Result<String, AiError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.config.model, self.config.api_key
        );
        let body = json!({
            "contents": [{
                "parts": [{ "text": build_prompt(brief, lang) }]
            }]
        });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Text generation failed");
            return Err(AiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        extract_text(&payload).ok_or(AiError::EmptyResponse)
    }
}

/// The studio's house prompt: a senior interior architect writing a
/// poetic, high-end description in the visitor's language.
fn build_prompt(brief: &str, lang: Language) -> String {
    format!(
        "Act as a senior Interior Architect and Lighting Designer. Write a poetic, \
         high-end design description in {} for the following concept: \"{brief}\".\n\
         Focus on:\n\
         1. Spatial flow and layout.\n\
         2. Lighting atmosphere (natural vs artificial).\n\
         3. Material textures and furniture selection.\n\
         4. The feeling of the space.\n\
         Keep it under 100 words.",
        lang.english_name()
    )
}

/// Pull the first candidate's text out of a `generateContent` response.
fn extract_text(payload: &Value) -> Option<String> {
    let text = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()?;
    (!text.is_empty()).then(|| text.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
