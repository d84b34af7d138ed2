//! Integration tests for the public content surface.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, send_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn gallery_lists_the_seed_projects() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = get(app, "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let cards = json["data"].as_array().unwrap();
    assert_eq!(cards.len(), 3);

    // The seed title is a legacy plain string; it resolves regardless of
    // language.
    assert_eq!(cards[0]["id"], "p1");
    assert_eq!(cards[0]["title"], "Luxury Villa");
}

#[tokio::test]
async fn gallery_resolves_the_requested_language() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let json = body_json(get(app, "/api/v1/projects?lang=tr").await).await;
    let first = &json["data"][0];

    assert_eq!(first["title"], "Luxury Villa");
    assert_eq!(
        first["description"],
        "Geleneksel unsurları çağdaş tasarımla harmanlayan modern lüks bir villa."
    );
}

#[tokio::test]
async fn unknown_language_code_falls_back_to_english() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let json = body_json(get(app, "/api/v1/projects?lang=xx").await).await;
    assert_eq!(
        json["data"][0]["description"],
        "A modern luxury villa blending traditional elements with contemporary design."
    );
}

// ---------------------------------------------------------------------------
// Project detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn project_detail_returns_the_full_document() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = get(app, "/api/v1/projects/p2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], "p2");
    // All language variants are present for client-side resolution.
    assert_eq!(
        json["data"]["description"]["ar"],
        "تصميم علوي مفتوح يعزز الإضاءة الطبيعية والمساحة."
    );
}

#[tokio::test]
async fn unknown_project_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = get(app, "/api/v1/projects/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Singletons
// ---------------------------------------------------------------------------

#[tokio::test]
async fn about_defaults_to_the_compiled_in_identity() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let json = body_json(get(app, "/api/v1/about").await).await;
    assert_eq!(json["data"]["name"]["en"], "Mariam Al-Haidari");
    assert_eq!(json["data"]["fontSize"], 16);
}

#[tokio::test]
async fn contact_defaults_to_the_compiled_in_card() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let json = body_json(get(app, "/api/v1/contact").await).await;
    assert_eq!(json["data"]["email"], "studio@arc-elite.com");
    assert_eq!(json["data"]["address"]["tr"], "Riyad, Suudi Arabistan");
}

#[tokio::test]
async fn theme_defaults_to_the_house_fonts() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let json = body_json(get(app, "/api/v1/theme").await).await;
    assert_eq!(json["data"]["serif"], "Bodoni Moda");
    assert_eq!(json["data"]["arabic"], "Noto Kufi Arabic");
}

// ---------------------------------------------------------------------------
// Narrative tool
// ---------------------------------------------------------------------------

#[tokio::test]
async fn narrative_without_credentials_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/narrative",
        None,
        &json!({ "prompt": "a desert villa", "lang": "ar" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
