//! In-process router tests
//!
//! These drive the full router through `tower::ServiceExt::oneshot` with a
//! lazily-connecting pool, so every path that stops before the database can
//! be checked without a running server.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use booknest_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

fn test_app() -> Router {
    let config = AppConfig::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("valid database url");
    let services = Services::new(Repository::new(pool), config.auth.clone());

    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_running_with_timestamp() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "BookNest API is running!");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(
        response.headers().get("x-frame-options").unwrap(),
        "SAMEORIGIN"
    );
}

#[tokio::test]
async fn unknown_route_gets_the_not_found_envelope() {
    let response = test_app()
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let response = test_app()
        .oneshot(Request::get("/api/books").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn non_bearer_authorization_is_unauthorized() {
    let response = test_app()
        .oneshot(
            Request::get("/api/books")
                .header("Authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn garbage_bearer_token_is_invalid() {
    let response = test_app()
        .oneshot(
            Request::get("/api/books")
                .header("Authorization", "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn signup_rejects_invalid_email() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            serde_json::json!({
                "name": "Jane",
                "email": "not-an-email",
                "password": "secret123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid email format");
}

#[tokio::test]
async fn signup_rejects_short_password() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            serde_json::json!({
                "name": "Jane",
                "email": "jane@example.com",
                "password": "abc"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn login_rejects_missing_field_with_deserializer_message() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "email": "jane@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("password"), "unexpected message: {message}");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = test_app()
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"].get("/api/books").is_some());
    assert!(body["paths"].get("/api/auth/signup").is_some());
}
