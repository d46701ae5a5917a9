//! Shared helpers for integration tests.
//!
//! Each test builds its own router over a fresh in-memory store, so tests
//! never share rate-limit counters or sessions.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use gatehouse_api::{AppState, build_router};
use gatehouse_auth::credentials::MemoryCredentialRepository;
use gatehouse_core::config::AppConfig;
use gatehouse_store::memory::MemoryStoreProvider;

/// Builds a router over a fresh in-memory store.
pub fn test_app() -> Router {
    let mut config = AppConfig::default();
    config.auth.token_secret = "integration-test-secret".to_string();

    let state = AppState::new(
        config,
        Arc::new(MemoryStoreProvider::new()),
        Arc::new(MemoryCredentialRepository::new()),
    );
    build_router(state)
}

/// Sends one request and returns the full response.
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);

    // Every request needs a client key for the limiter; tests that care
    // about the key pass their own x-forwarded-for.
    if !headers.iter().any(|(name, _)| *name == "x-forwarded-for") {
        builder = builder.header("x-forwarded-for", "10.1.1.1");
    }

    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Reads and parses the response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Registers a subject and returns (identifier, password).
pub async fn register_subject(app: &Router, identifier: &str) -> (String, String) {
    let password = "a-sufficiently-long-password";
    let response = send(
        app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "identifier": identifier, "password": password })),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    (identifier.to_string(), password.to_string())
}

/// Logs in and returns (bearer token, session cookie value).
pub async fn login_subject(app: &Router, identifier: &str, password: &str) -> (String, String) {
    let response = send(
        app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "identifier": identifier, "password": password })),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let body = body_json(response).await;
    let token = body["accessToken"].as_str().unwrap().to_string();

    (token, cookie)
}
