mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, empty_request, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_get_port(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/getPort"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "8080");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_performance_endpoints_agree(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    for version in ["v1", "v2", "v3", "v4"] {
        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/test-performance/{}", version)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", version);

        assert_eq!(body_json(response).await, json!(500000500000_i64), "{}", version);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_responses_carry_request_id(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/getPort"))
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_openapi_document_is_served(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/faculties"].is_object());
    assert!(body["paths"]["/avatars/{id}"].is_object());
}
