//! Identity resolution and route guarding.
//!
//! Resolution tries the `Authorization: Bearer` header first, then the
//! session cookie. The admission decision itself is the pure function in
//! `gatehouse_auth::guard`; this middleware only feeds it and attaches the
//! admitted identity to the request extensions.

use axum::extract::{MatchedPath, Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use gatehouse_auth::guard::{GuardMode, decide};
use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_core::result::AppResult;
use gatehouse_core::types::Identity;

use crate::cookies;
use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the request identity and enforces the route's guard mode.
pub async fn enforce(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let Some(pattern) = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
    else {
        return next.run(request).await;
    };

    let policy = state.policies.resolve(request.method(), &pattern);
    let resolution = resolve_identity(&state, request.headers()).await;

    let identity = match resolution {
        Ok(identity) => identity,
        // A broken credential blocks protected routes but does not stop a
        // guest from reaching login or register.
        Err(e) if policy.guard == GuardMode::AuthRequired => return ApiError(e).into_response(),
        Err(e) => {
            debug!(kind = %e.kind, "Ignoring unusable credential on non-protected route");
            None
        }
    };

    match decide(policy.guard, identity) {
        Ok(Some(identity)) => {
            request.extensions_mut().insert(identity);
        }
        Ok(None) => {}
        Err(e) => return ApiError(e).into_response(),
    }

    next.run(request).await
}

/// Resolves an identity from the request headers, if any credential is
/// present.
///
/// An absent credential is `Ok(None)`; a present but unusable one (bad
/// signature, expired token, dead session) is an error so protected
/// routes can distinguish "anonymous" from "rejected".
async fn resolve_identity(state: &AppState, headers: &HeaderMap) -> AppResult<Option<Identity>> {
    if let Some(token) = bearer_token(headers) {
        let claims = state.token_service.verify(token)?;
        return Ok(Some(Identity::from_token(claims.sub, claims.claims)));
    }

    if let Some(session_id) = cookies::extract_cookie(headers, &state.config.auth.cookie_name) {
        return match state.sessions.lookup(&session_id).await? {
            Some(session) => Ok(Some(Identity::from_session(session.subject_id))),
            None => Err(AppError::new(
                ErrorKind::SessionExpired,
                "Session has expired or is unknown",
            )),
        };
    }

    Ok(None)
}

/// Extracts the token from an `Authorization: Bearer` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
