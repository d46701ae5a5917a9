//! End-to-end authentication flow: register, login, me, logout.

mod common;

use axum::http::{Method, StatusCode, header};
use serde_json::json;

use common::{body_json, login_subject, register_subject, send, test_app};

#[tokio::test]
async fn test_register_creates_subject() {
    let app = test_app();
    let response = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "identifier": "alice", "password": "a-long-password" })),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["identifier"], "alice");
    assert!(body["subjectId"].is_i64());
}

#[tokio::test]
async fn test_duplicate_identifier_conflicts() {
    let app = test_app();
    register_subject(&app, "alice").await;

    let response = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "identifier": "alice", "password": "another-password" })),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 409);
    assert_eq!(body["path"], "/api/auth/register");
}

#[tokio::test]
async fn test_short_password_rejected_with_field_messages() {
    let app = test_app();
    let response = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "identifier": "bob", "password": "short" })),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].is_array());
    assert!(
        body["message"]
            .as_array()
            .unwrap()
            .iter()
            .any(|m| m.as_str().unwrap().starts_with("password:"))
    );
}

#[tokio::test]
async fn test_login_issues_token_and_cookie() {
    let app = test_app();
    let (identifier, password) = register_subject(&app, "carol").await;

    let response = send(
        &app,
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
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("gatehouse_session="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    assert_eq!(body["tokenType"], "Bearer");
    assert!(body["accessToken"].as_str().unwrap().contains('.'));
    assert_eq!(body["expiresIn"], 15 * 60);
}

#[tokio::test]
async fn test_login_wrong_password_is_generic_401() {
    let app = test_app();
    let (identifier, _) = register_subject(&app, "dave").await;

    let response = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "identifier": identifier, "password": "wrong-password-here" })),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    // Same message as an unknown identifier; the response never says which.
    assert_eq!(body["message"], "invalid identifier or password");
}

#[tokio::test]
async fn test_login_unknown_identifier_same_message() {
    let app = test_app();
    let response = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "identifier": "nobody", "password": "whatever-password" })),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "invalid identifier or password");
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let app = test_app();
    let (identifier, password) = register_subject(&app, "erin").await;
    let (token, _) = login_subject(&app, &identifier, &password).await;

    let response = send(
        &app,
        Method::GET,
        "/api/auth/me",
        None,
        &[("authorization", &format!("Bearer {token}"))],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "bearer_token");
    assert!(body["subjectId"].is_i64());
}

#[tokio::test]
async fn test_me_with_session_cookie() {
    let app = test_app();
    let (identifier, password) = register_subject(&app, "frank").await;
    let (_, cookie) = login_subject(&app, &identifier, &password).await;

    let response = send(&app, Method::GET, "/api/auth/me", None, &[("cookie", &cookie)]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["source"], "session_cookie");
}

#[tokio::test]
async fn test_me_without_credentials_is_401_envelope() {
    let app = test_app();
    let response = send(&app, Method::GET, "/api/auth/me", None, &[]).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["path"], "/api/auth/me");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_logout_destroys_session_but_not_token() {
    let app = test_app();
    let (identifier, password) = register_subject(&app, "grace").await;
    let (token, cookie) = login_subject(&app, &identifier, &password).await;

    let response = send(
        &app,
        Method::POST,
        "/api/auth/logout",
        None,
        &[("cookie", &cookie)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    // The session is gone.
    let with_cookie = send(&app, Method::GET, "/api/auth/me", None, &[("cookie", &cookie)]).await;
    assert_eq!(with_cookie.status(), StatusCode::UNAUTHORIZED);

    // The bearer token survives until natural expiry.
    let with_token = send(
        &app,
        Method::GET,
        "/api/auth/me",
        None,
        &[("authorization", &format!("Bearer {token}"))],
    )
    .await;
    assert_eq!(with_token.status(), StatusCode::OK);
}
