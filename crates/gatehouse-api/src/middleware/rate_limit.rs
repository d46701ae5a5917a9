//! Fixed-window rate limiting middleware.
//!
//! Runs before the guard so unauthenticated floods are counted too; the
//! client key is therefore the client IP, taken from `x-forwarded-for`
//! when a proxy supplies it and the socket address otherwise.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, MatchedPath, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use gatehouse_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Counts the request against its route's window and rejects with 429
/// once the limit is reached. The counter is shared through the store, so
/// the limit holds across every instance pointed at the same backend.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    // Unmatched requests fall through to the router's own 404.
    let Some(pattern) = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
    else {
        return next.run(request).await;
    };

    let policy = state.policies.resolve(request.method(), &pattern);
    let Some((limit, window)) = policy.rate_limit else {
        return next.run(request).await;
    };

    let client_key = client_key(&request);
    let decision = match state
        .limiter
        .check(&policy.scope, &client_key, limit, window)
        .await
    {
        Ok(decision) => decision,
        Err(e) => return ApiError(e).into_response(),
    };

    let retry_after_seconds = (decision.reset_at - Utc::now()).num_seconds().max(0);

    if !decision.admitted {
        let mut response = ApiError(AppError::rate_limited()).into_response();
        if let Ok(value) = HeaderValue::from_str(&retry_after_seconds.to_string()) {
            response.headers_mut().insert("retry-after", value);
        }
        return response;
    }

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&decision.remaining.to_string()) {
        response.headers_mut().insert("x-ratelimit-remaining", value);
    }
    response
}

/// Derives the per-client limiter key from the request.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
