//! Every failure leaves the service in the same envelope shape:
//! `{statusCode, timestamp, path, message}`.

mod common;

use axum::http::{Method, StatusCode};
use chrono::DateTime;
use serde_json::json;

use common::{body_json, send, test_app};

#[tokio::test]
async fn test_unknown_route_is_enveloped_404() {
    let app = test_app();
    let response = send(&app, Method::GET, "/api/no/such/route", None, &[]).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["path"], "/api/no/such/route");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_wrong_method_is_enveloped_405() {
    let app = test_app();
    let response = send(&app, Method::GET, "/api/auth/login", None, &[]).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 405);
    assert_eq!(body["path"], "/api/auth/login");
}

#[tokio::test]
async fn test_envelope_has_exactly_four_fields() {
    let app = test_app();
    let response = send(&app, Method::GET, "/api/auth/me", None, &[]).await;

    let body = body_json(response).await;
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object.contains_key("statusCode"));
    assert!(object.contains_key("timestamp"));
    assert!(object.contains_key("path"));
    assert!(object.contains_key("message"));
}

#[tokio::test]
async fn test_timestamp_is_rfc3339() {
    let app = test_app();
    let response = send(&app, Method::GET, "/api/auth/me", None, &[]).await;

    let body = body_json(response).await;
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_malformed_body_is_enveloped_400() {
    let app = test_app();
    let response = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "identifier": 42 })),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["path"], "/api/auth/register");
}

#[tokio::test]
async fn test_error_responses_are_json() {
    let app = test_app();
    let response = send(&app, Method::GET, "/api/auth/me", None, &[]).await;

    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}
