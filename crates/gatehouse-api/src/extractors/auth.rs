//! Identity extractor.
//!
//! The guard middleware resolves the identity and stores it in the request
//! extensions; this extractor hands it to handlers. A handler asking for
//! `CurrentIdentity` on a route the guard did not protect is a wiring
//! mistake and surfaces as 401 rather than a panic.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatehouse_core::error::AppError;
use gatehouse_core::types::Identity;

use crate::error::ApiError;

/// The authenticated identity of the current request.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Self)
            .ok_or_else(|| ApiError(AppError::unauthorized("Authentication required")))
    }
}
