//! Admin-gate extractor for Axum handlers.
//!
//! The content-management routes are gated by a single shared PIN sent in
//! the `x-admin-pin` header and compared as a plain string. This is a
//! convenience gate keeping the forms off the public surface, not a
//! security boundary: no hashing, no rate limiting, no sessions.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use atelier_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the admin PIN.
pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";

/// Proof that the request carried the configured admin PIN.
///
/// Use as an extractor parameter in any handler behind the admin gate:
///
/// ```ignore
/// async fn save_about(_admin: RequireAdmin, ...) -> AppResult<Json<()>> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let pin = parts
            .headers
            .get(ADMIN_PIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {ADMIN_PIN_HEADER} header"
                )))
            })?;

        if pin != state.config.admin_pin {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin PIN".into(),
            )));
        }

        Ok(RequireAdmin)
    }
}
