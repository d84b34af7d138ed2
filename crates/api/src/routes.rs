//! Route definitions.
//!
//! Route hierarchy under `/api/v1`:
//!
//! ```text
//! /projects                      gallery listing (?lang=)
//! /projects/{id}                 full project document
//! /projects/{id}/reviews         list (GET), submit (POST, ?lang=)
//! /about                         about singleton
//! /contact                       contact singleton
//! /theme                         theme singleton
//! /narrative                     AI narrative tool (POST)
//!
//! /admin/about                   overwrite (PUT, PIN-gated)
//! /admin/contact                 overwrite (PUT, PIN-gated)
//! /admin/theme                   overwrite (PUT, PIN-gated)
//! /admin/projects                create (POST, PIN-gated)
//! /admin/projects/{id}           update (PUT), delete (DELETE)
//! /admin/reviews                 moderation listing (GET, PIN-gated)
//! /admin/reviews/{id}            delete (?projectId=, PIN-gated)
//! ```
//!
//! `GET /health` is mounted at root level, outside the versioned tree.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public_router())
        .nest("/admin", admin_router())
}

/// Root-level health check.
pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Public content and review routes.
fn public_router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::content::list_projects))
        .route("/projects/{id}", get(handlers::content::get_project))
        .route(
            "/projects/{id}/reviews",
            get(handlers::reviews::list_reviews).post(handlers::reviews::submit_review),
        )
        .route("/about", get(handlers::content::get_about))
        .route("/contact", get(handlers::content::get_contact))
        .route("/theme", get(handlers::content::get_theme))
        .route("/narrative", post(handlers::narrative::generate))
}

/// PIN-gated content-management routes.
fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/about", put(handlers::admin::save_about))
        .route("/contact", put(handlers::admin::save_contact))
        .route("/theme", put(handlers::admin::save_theme))
        .route("/projects", post(handlers::admin::create_project))
        .route(
            "/projects/{id}",
            put(handlers::admin::update_project).delete(handlers::admin::delete_project),
        )
        .route("/reviews", get(handlers::reviews::all_reviews))
        .route("/reviews/{id}", delete(handlers::reviews::delete_review))
}
