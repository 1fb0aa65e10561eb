mod support;

use axum::http::{StatusCode, header};
use axum_test::multipart::{MultipartForm, Part};
use folio_model::Bucket;
use serde_json::{Value, json};
use support::{ADMIN_TOKEN, EDITOR_TOKEN, Seed, TestApp, hero, project, session, text};

fn titles(items: &Value) -> Vec<String> {
    items
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["title_en"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn orders(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["order"].as_i64().unwrap_or_default())
        .collect()
}

#[tokio::test]
async fn signed_out_visitors_are_sent_to_login() {
    let app = TestApp::new();

    let response = app.server.get("/api/v1/admin/projects").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/login");
}

#[tokio::test]
async fn non_admins_see_denial_page() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/api/v1/admin/projects")
        .add_header(header::COOKIE, session(EDITOR_TOKEN))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().contains("No estás autorizado."));
}

#[tokio::test]
async fn unknown_tokens_count_as_signed_out() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/admin")
        .add_header(header::COOKIE, session("stale"))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn admin_index_lists_every_section() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/api/v1/admin")
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let sections = body["data"]["sections"].as_array().expect("sections");
    assert_eq!(sections.len(), 6);
    assert_eq!(sections[0]["href"], "/api/v1/admin/general_text");
    assert_eq!(body["data"]["user"]["email"], support::ADMIN_EMAIL);
}

#[tokio::test]
async fn created_projects_append_in_steps_of_ten() {
    let app = TestApp::new();

    for title in ["First", "Second"] {
        app.server
            .post("/api/v1/admin/projects")
            .add_header(header::COOKIE, session(ADMIN_TOKEN))
            .json(&json!({ "title_es": title, "title_en": title }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = app
        .server
        .get("/api/v1/admin/projects")
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .await
        .json();
    assert_eq!(titles(&body["data"]), ["First", "Second"]);
    assert_eq!(orders(&body["data"]), [10, 20]);
}

#[tokio::test]
async fn create_without_required_title_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/admin/projects")
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "title_es": "", "title_en": "Only english" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(app.projects.write_count(), 0);
}

#[tokio::test]
async fn moving_up_swaps_with_previous_row() {
    let p1 = project("P1", 10);
    let p2 = project("P2", 20);
    let p3 = project("P3", 30);
    let target = p3.id;
    let app = TestApp::with_seed(Seed {
        projects: vec![p1, p2, p3],
        ..Seed::default()
    });

    let response = app
        .server
        .post(&format!("/api/v1/admin/projects/{target}/move"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "direction": "up" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["outcome"]["status"], "moved");
    assert_eq!(titles(&body["data"]["items"]), ["P1", "P3", "P2"]);
    assert_eq!(orders(&body["data"]["items"]), [10, 20, 30]);
    assert_eq!(app.projects.write_count(), 1);
}

#[tokio::test]
async fn moving_first_row_up_changes_nothing() {
    let p1 = project("P1", 10);
    let target = p1.id;
    let app = TestApp::with_seed(Seed {
        projects: vec![p1, project("P2", 20)],
        ..Seed::default()
    });

    let response = app
        .server
        .post(&format!("/api/v1/admin/projects/{target}/move"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "direction": "up" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["outcome"]["status"], "unchanged");
    assert_eq!(titles(&body["data"]["items"]), ["P1", "P2"]);
    assert_eq!(app.projects.write_count(), 0);
}

#[tokio::test]
async fn failed_reorder_reports_message() {
    let p1 = project("P1", 10);
    let target = p1.id;
    let app = TestApp::with_seed(Seed {
        projects: vec![p1, project("P2", 20)],
        ..Seed::default()
    });
    app.projects.fail_writes("connection reset");

    let response = app
        .server
        .post(&format!("/api/v1/admin/projects/{target}/move"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "direction": "down" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap_or_default().contains("connection reset"));
    assert_eq!(body["data"]["outcome"]["status"], "failed");
    assert_eq!(titles(&body["data"]["items"]), ["P1", "P2"]);
}

#[tokio::test]
async fn move_without_direction_uses_error_envelope() {
    let p1 = project("P1", 10);
    let target = p1.id;
    let app = TestApp::with_seed(Seed {
        projects: vec![p1],
        ..Seed::default()
    });

    let response = app
        .server
        .post(&format!("/api/v1/admin/projects/{target}/move"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().is_some());
    assert_eq!(app.projects.write_count(), 0);
}

#[tokio::test]
async fn unknown_category_uses_error_envelope() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/admin/technologies")
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "name": "Rust", "category": "guru" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(app.technologies.write_count(), 0);
}

#[tokio::test]
async fn notice_stream_is_admin_only() {
    let app = TestApp::new();

    let response = app.server.get("/api/v1/admin/notices").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/login");

    app.server
        .get("/api/v1/admin/notices")
        .add_header(header::COOKIE, session(EDITOR_TOKEN))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_writes_publish_notices() {
    let app = TestApp::new();
    let mut notices = app.state.notifier.subscribe();

    app.server
        .post("/api/v1/admin/projects")
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "title_es": "Folio", "title_en": "Folio" }))
        .await
        .assert_status(StatusCode::CREATED);

    let notice = notices.try_recv().expect("notice published");
    assert_eq!(notice.title, "Proyecto guardado exitosamente");
}

#[tokio::test]
async fn deleting_text_removes_only_that_row() {
    let keep = text("nav.about", "Sobre mí", "About");
    let doomed = text("nav.blog", "Blog", "Blog");
    let doomed_id = doomed.id;
    let app = TestApp::with_seed(Seed {
        general_text: vec![keep, doomed],
        ..Seed::default()
    });

    let response = app
        .server
        .delete(&format!("/api/v1/admin/general_text/{doomed_id}"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let remaining = body["data"].as_array().expect("rows");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["key"], "nav.about");

    app.server
        .delete(&format!("/api/v1/admin/general_text/{doomed_id}"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updating_hero_keeps_untouched_fields() {
    let row = hero();
    let id = row.id;
    let app = TestApp::with_seed(Seed {
        hero: vec![row],
        ..Seed::default()
    });

    let response = app
        .server
        .put(&format!("/api/v1/admin/hero/{id}"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "title": "Gerardo M." }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Gerardo M.");
    assert_eq!(body["data"]["greeting_es"], "Hola, soy");
}

#[tokio::test]
async fn upload_without_file_is_rejected_before_storage() {
    let row = hero();
    let id = row.id;
    let app = TestApp::with_seed(Seed {
        hero: vec![row],
        ..Seed::default()
    });

    let form = MultipartForm::new().add_text("note", "nothing attached");
    let response = app
        .server
        .post(&format!("/api/v1/admin/hero/{id}/cv"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .multipart(form)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.storage.upload_count(), 0);
    assert_eq!(app.hero.write_count(), 0);
}

#[tokio::test]
async fn cv_upload_sets_public_url() {
    let row = hero();
    let id = row.id;
    let app = TestApp::with_seed(Seed {
        hero: vec![row],
        ..Seed::default()
    });

    let part = Part::bytes(b"%PDF-1.7".to_vec())
        .file_name("cv.pdf")
        .mime_type("application/pdf");
    let response = app
        .server
        .post(&format!("/api/v1/admin/hero/{id}/cv"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .multipart(MultipartForm::new().add_part("file", part))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let url = body["data"]["cv_url"].as_str().expect("cv url");
    assert!(url.starts_with("memory://cvs/"));
    assert!(url.ends_with(".pdf"));
    assert_eq!(app.storage.upload_count(), 1);

    let objects = app.storage.objects();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].0, Bucket::Cvs);
    assert!(url.ends_with(&objects[0].1));
    assert_eq!(objects[0].2, b"%PDF-1.7".len());
}

#[tokio::test]
async fn gallery_upload_appends() {
    let row = project("Folio", 10);
    let id = row.id;
    let app = TestApp::with_seed(Seed {
        projects: vec![row],
        ..Seed::default()
    });

    for name in ["one.png", "two.png"] {
        let part = Part::bytes(vec![0u8; 8]).file_name(name).mime_type("image/png");
        app.server
            .post(&format!("/api/v1/admin/projects/{id}/gallery"))
            .add_header(header::COOKIE, session(ADMIN_TOKEN))
            .multipart(MultipartForm::new().add_part("file", part))
            .await
            .assert_status_ok();
    }

    let body: Value = app
        .server
        .get("/api/v1/admin/projects")
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .await
        .json();
    let gallery = body["data"][0]["gallery_urls"].as_array().expect("gallery");
    assert_eq!(gallery.len(), 2);
}

#[tokio::test]
async fn upload_to_missing_row_never_reaches_storage() {
    let app = TestApp::new();

    let part = Part::bytes(b"x".to_vec()).file_name("logo.svg");
    let response = app
        .server
        .post(&format!(
            "/api/v1/admin/technologies/{}/logo",
            uuid::Uuid::new_v4()
        ))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .multipart(MultipartForm::new().add_part("file", part))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(app.storage.upload_count(), 0);
}

#[tokio::test]
async fn array_inputs_skip_blanks_and_duplicates() {
    let row = project("Folio", 10);
    let id = row.id;
    let app = TestApp::with_seed(Seed {
        projects: vec![row],
        ..Seed::default()
    });

    for value in ["Rust", "Rust", "  ", "Axum"] {
        app.server
            .post(&format!("/api/v1/admin/projects/{id}/lists/tech"))
            .add_header(header::COOKIE, session(ADMIN_TOKEN))
            .json(&json!({ "action": "add", "value": value }))
            .await
            .assert_status_ok();
    }

    let response = app
        .server
        .post(&format!("/api/v1/admin/projects/{id}/lists/tech"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "action": "remove", "value": "Rust" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["tech"], json!(["Axum"]));
}

#[tokio::test]
async fn array_input_rejects_scalar_fields() {
    let row = project("Folio", 10);
    let id = row.id;
    let app = TestApp::with_seed(Seed {
        projects: vec![row],
        ..Seed::default()
    });

    let response = app
        .server
        .post(&format!("/api/v1/admin/projects/{id}/lists/title_en"))
        .add_header(header::COOKIE, session(ADMIN_TOKEN))
        .json(&json!({ "action": "add", "value": "x" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(body_status(&response), "error");
    assert_eq!(app.projects.write_count(), 0);
}

fn body_status(response: &axum_test::TestResponse) -> String {
    let body: Value = response.json();
    body["status"].as_str().unwrap_or_default().to_string()
}
