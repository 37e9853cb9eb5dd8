//! HTTP-level tests for project creation and the public project pages.
//!
//! Creation goes through the multipart admin endpoint so the media
//! manifest, the stored uploads, and the persisted rows are checked together.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, build_test_app, get, post_multipart, token_for, MultipartBody,
};
use sqlx::PgPool;

fn sample_form() -> MultipartBody {
    MultipartBody::new()
        .project("Site", "A small site", "web")
        .slot("file", "a", "")
        .slot("youtube", "b", "  https://yt/x  ")
        .slot("file", "c", "")
        .file("media_file", "f1.jpg", "image/jpeg", b"jpeg bytes")
        .file("media_file", "f2.mp4", "video/mp4", b"mp4 bytes")
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_reconciles_manifest(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());
    let token = token_for("admin", dir.path());

    let response = post_multipart(app, "/api/v1/admin/projects", Some(&token), sample_form()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Site");
    assert_eq!(json["short_description"], "A small site");
    assert!(json["cover_image"].is_null());

    let media = json["media"].as_array().unwrap();
    assert_eq!(media.len(), 3);

    assert_eq!(media[0]["media_kind"], "image");
    assert_eq!(media[0]["caption"], "a");
    assert_eq!(media[0]["sort_order"], 1);
    let image_path = media[0]["media_path"].as_str().unwrap();
    assert!(image_path.starts_with("/uploads/"));
    assert!(image_path.ends_with("-f1.jpg"));

    assert_eq!(media[1]["media_kind"], "youtube");
    assert_eq!(media[1]["media_path"], "https://yt/x");
    assert_eq!(media[1]["sort_order"], 2);

    assert_eq!(media[2]["media_kind"], "video");
    assert_eq!(media[2]["caption"], "c");
    assert_eq!(media[2]["sort_order"], 3);

    let stored = image_path.trim_start_matches("/uploads/");
    assert_eq!(std::fs::read(dir.path().join(stored)).unwrap(), b"jpeg bytes");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_skips_blank_youtube_and_exhausted_files(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());
    let token = token_for("editor", dir.path());

    let form = MultipartBody::new()
        .project("Sparse", "Few files", "web")
        .slot("file", "one", "")
        .slot("youtube", "blank", "   ")
        .slot("file", "missing", "")
        .slot("youtube", "kept", "https://yt/y")
        .file("media_file", "only.png", "image/png", b"png");

    let response = post_multipart(app, "/api/v1/admin/projects", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let media = json["media"].as_array().unwrap();
    let captions: Vec<&str> = media.iter().map(|m| m["caption"].as_str().unwrap()).collect();
    assert_eq!(captions, vec!["one", "kept"]);
    let orders: Vec<i64> = media.iter().map(|m| m["sort_order"].as_i64().unwrap()).collect();
    assert_eq!(orders, vec![1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_removes_surplus_uploads(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());
    let token = token_for("editor", dir.path());

    let form = MultipartBody::new()
        .project("Extra", "More files than slots", "web")
        .slot("file", "used", "")
        .file("media_file", "used.jpg", "image/jpeg", b"1")
        .file("media_file", "extra.jpg", "image/jpeg", b"2");

    let response = post_multipart(app, "/api/v1/admin/projects", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(stored.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_accepts_very_long_filenames(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());
    let token = token_for("editor", dir.path());

    let long_name = format!("{}.png", "x".repeat(400));
    let form = MultipartBody::new()
        .project("Long", "Long upload name", "web")
        .slot("file", "shot", "")
        .file("media_file", &long_name, "image/png", b"png");

    let response = post_multipart(app, "/api/v1/admin/projects", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let path = json["media"][0]["media_path"].as_str().unwrap();
    assert!(path.ends_with(".png"));
    assert!(path.len() < 200);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_missing_fields_echoes_values(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());
    let token = token_for("editor", dir.path());

    let form = MultipartBody::new()
        .text("project_name", "Half")
        .text("project_short_description", "   ")
        .slot("file", "a", "")
        .file("media_file", "f1.jpg", "image/jpeg", b"x");

    let response = post_multipart(app.clone(), "/api/v1/admin/projects", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "All fields are required");
    assert_eq!(json["fields"]["project_name"], "Half");
    assert_eq!(json["fields"]["project_type"], "");

    // Nothing was written or stored.
    assert_eq!(std::fs::read_dir(dir.path()).map(|d| d.count()).unwrap_or(0), 0);
    let list = body_json(get(app, "/api/v1/projects").await).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_accepts_bracketed_field_names(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());
    let token = token_for("editor", dir.path());

    let form = MultipartBody::new()
        .project("Brackets", "PHP-style names", "web")
        .text("media_type[]", "youtube")
        .text("media_desc[]", "clip")
        .text("media_youtube[]", "https://yt/z");

    let response = post_multipart(app, "/api/v1/admin/projects", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["media"][0]["media_path"], "https://yt/z");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_token(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());

    let response = post_multipart(app, "/api/v1/admin/projects", None, sample_form()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_and_detail(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());
    let token = token_for("editor", dir.path());

    let created = body_json(
        post_multipart(app.clone(), "/api/v1/admin/projects", Some(&token), sample_form()).await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let list = body_json(get(app.clone(), "/api/v1/projects").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id);

    let response = get(app, &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    let orders: Vec<i64> = detail["media"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["sort_order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_of_missing_project_is_404(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());

    let response = get(app, "/api/v1/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uploaded_files_are_served(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());
    let token = token_for("editor", dir.path());

    let created = body_json(
        post_multipart(app.clone(), "/api/v1/admin/projects", Some(&token), sample_form()).await,
    )
    .await;
    let path = created["media"][0]["media_path"].as_str().unwrap().to_string();

    let response = get(app, &path).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"jpeg bytes");
}
