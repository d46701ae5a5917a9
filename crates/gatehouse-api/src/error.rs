//! Error mapping from `AppError` to HTTP responses.
//!
//! Handlers return `ApiResult<T>`; failures carry the `AppError` into the
//! response extensions, and the outermost error boundary renders the final
//! JSON envelope once the request path is known. Clients therefore see one
//! shape for every failure, wherever in the pipeline it happened.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_core::error::{AppError, ErrorKind};

/// Result alias for handler functions.
pub type ApiResult<T> = Result<T, ApiError>;

/// Newtype carrying an [`AppError`] across the Axum boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// The uniform error body every failing response carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
    pub path: String,
    /// A string for most failures; an array of per-field messages for
    /// validation failures.
    pub message: serde_json::Value,
}

impl ErrorEnvelope {
    /// Builds the envelope for an application error on a given path.
    pub fn from_error(err: &AppError, path: &str) -> Self {
        Self {
            status_code: status_for(err.kind).as_u16(),
            timestamp: Utc::now(),
            path: path.to_string(),
            message: message_for(err),
        }
    }

    /// Builds the envelope for a bare status the router produced itself
    /// (404 on unknown paths, 405 on wrong methods).
    pub fn from_status(status: StatusCode, path: &str) -> Self {
        Self {
            status_code: status.as_u16(),
            timestamp: Utc::now(),
            path: path.to_string(),
            message: serde_json::Value::String(
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            ),
        }
    }
}

/// Maps an error kind to its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        kind if kind.is_unauthorized() => StatusCode::UNAUTHORIZED,
        // Store, Configuration, Serialization, Internal
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The client-facing message for an error.
///
/// Internal kinds never leak their detail; validation failures surface
/// their per-field messages as an array.
fn message_for(err: &AppError) -> serde_json::Value {
    match err.kind {
        ErrorKind::Validation if !err.details.is_empty() => serde_json::Value::Array(
            err.details
                .iter()
                .map(|d| serde_json::Value::String(d.clone()))
                .collect(),
        ),
        ErrorKind::Store
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => serde_json::Value::String("Internal server error".to_string()),
        _ => serde_json::Value::String(err.message.clone()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind);
        let mut response = status.into_response();
        // The envelope is rendered by the error boundary, which knows the
        // request path; until then the error itself rides along.
        response.extensions_mut().insert(self.0);
        response
    }
}
