mod support;

use axum::http::{HeaderValue, StatusCode, header};
use serde_json::{Value, json};
use support::{Seed, TestApp, hero, project, text};

fn seeded() -> TestApp {
    TestApp::with_seed(Seed {
        general_text: vec![text("nav.projects", "Proyectos", "Projects")],
        hero: vec![hero()],
        projects: vec![project("Folio", 10)],
    })
}

#[tokio::test]
async fn page_defaults_to_spanish() {
    let app = seeded();

    let response = app.server.get("/api/v1/page").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["lang"], "es");
    assert_eq!(body["data"]["hero"]["greeting"], "Hola, soy");
    assert_eq!(body["data"]["projects"][0]["title"], "Folio (es)");
    assert_eq!(body["data"]["texts"]["entries"]["nav.projects"], "Proyectos");
}

#[tokio::test]
async fn page_follows_lang_cookie_without_writing() {
    let app = seeded();

    let response = app
        .server
        .get("/api/v1/page")
        .add_header(header::COOKIE, HeaderValue::from_static("lang=en"))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["lang"], "en");
    assert_eq!(body["data"]["hero"]["subtitle"], "Software developer");
    assert_eq!(body["data"]["projects"][0]["title"], "Folio");
    assert_eq!(app.total_writes(), 0);
}

#[tokio::test]
async fn query_lang_beats_cookie() {
    let app = seeded();

    let body: Value = app
        .server
        .get("/api/v1/page")
        .add_query_param("lang", "es")
        .add_header(header::COOKIE, HeaderValue::from_static("lang=en"))
        .await
        .json();
    assert_eq!(body["data"]["lang"], "es");
}

#[tokio::test]
async fn empty_store_renders_empty_sections() {
    let app = TestApp::new();

    let body: Value = app.server.get("/api/v1/page").await.json();
    assert_eq!(body["data"]["hero"], Value::Null);
    assert_eq!(body["data"]["projects"], json!([]));
    assert_eq!(body["data"]["social_links"], json!([]));
}

#[tokio::test]
async fn set_lang_stores_cookie_for_thirty_days() {
    let app = TestApp::new();

    let response = app
        .server
        .put("/api/v1/lang")
        .json(&json!({ "lang": "en" }))
        .await;
    response.assert_status_ok();

    let cookie = response.header(header::SET_COOKIE);
    let cookie = cookie.to_str().expect("ascii cookie");
    assert!(cookie.starts_with("lang=en"));
    assert!(cookie.contains("Max-Age=2592000"));
    assert_eq!(app.total_writes(), 0);
}

#[tokio::test]
async fn set_lang_rejects_unknown_language() {
    let app = TestApp::new();

    let response = app
        .server
        .put("/api/v1/lang")
        .json(&json!({ "lang": "fr" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.maybe_header(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn ping_and_health() {
    let app = TestApp::new();

    app.server.get("/ping").await.assert_status_ok();

    let health = app.server.get("/health").await;
    health.assert_status_ok();
}
