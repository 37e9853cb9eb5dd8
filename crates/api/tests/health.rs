mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_endpoint(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["uploads_writable"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_upload_root_reports_degraded(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, &dir.path().join("not-created"));

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["uploads_writable"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());

    let response = get(app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_responses_carry_request_id(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(pool, dir.path());

    let response = get(app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
