//! Outermost error standardization.
//!
//! Every failing response leaves the process as the same JSON envelope:
//! `{statusCode, timestamp, path, message}`. Application errors ride the
//! response extensions until this point; bare error statuses the router
//! produced itself (404, 405) are enveloped from their status alone.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, warn};

use gatehouse_core::error::{AppError, ErrorKind};

use crate::error::ErrorEnvelope;

/// Renders the standard error envelope for every failing response.
pub async fn standardize_errors(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let (mut parts, body) = response.into_parts();

    if let Some(err) = parts.extensions.remove::<AppError>() {
        log_error(&err, &path);
        return render(parts, ErrorEnvelope::from_error(&err, &path));
    }

    if parts.status.is_client_error() || parts.status.is_server_error() {
        let envelope = ErrorEnvelope::from_status(parts.status, &path);
        return render(parts, envelope);
    }

    Response::from_parts(parts, body)
}

/// Replaces the response body with the serialized envelope, keeping the
/// status and headers (Retry-After in particular) intact.
fn render(mut parts: axum::http::response::Parts, envelope: ErrorEnvelope) -> Response {
    let body = serde_json::to_vec(&envelope).unwrap_or_else(|_| b"{}".to_vec());

    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.insert(
        CONTENT_TYPE,
        axum::http::HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, Body::from(body))
}

/// Server faults are logged at error with their source chain; client
/// faults at warn.
fn log_error(err: &AppError, path: &str) {
    match err.kind {
        ErrorKind::Store
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => {
            error!(kind = %err.kind, path, message = %err.message, "Request failed");
        }
        _ => {
            warn!(kind = %err.kind, path, message = %err.message, "Request rejected");
        }
    }
}
