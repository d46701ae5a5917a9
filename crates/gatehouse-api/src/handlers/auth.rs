//! Authentication handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::SET_COOKIE};
use axum::response::IntoResponse;
use tracing::info;

use gatehouse_core::error::AppError;

use crate::cookies;
use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MeResponse, MessageResponse, RegisterResponse};
use crate::error::ApiResult;
use crate::extractors::{CurrentIdentity, ValidatedJson};
use crate::state::AppState;

/// `POST /api/auth/register` — creates a subject from an identifier and
/// password. Guest-only; a logged-in caller is turned away by the guard.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    // Config may demand a longer minimum than the DTO's floor.
    let min = state.config.auth.password_min_length;
    if body.password.chars().count() < min {
        return Err(AppError::validation_fields(
            "Validation failed",
            vec![format!("password: must be at least {min} characters")],
        )
        .into());
    }

    let digest = state.password_hasher.hash_password(&body.password)?;
    let credential = state
        .credentials
        .create_subject(&body.identifier, &digest)
        .await?;

    info!(subject_id = credential.subject_id, "Subject registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            subject_id: credential.subject_id,
            identifier: credential.identifier,
        }),
    ))
}

/// `POST /api/auth/login` — verifies credentials, then issues both a
/// bearer token (in the body) and a session cookie (in `Set-Cookie`).
///
/// The failure message never says which of the two inputs was wrong.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let credential = state
        .credentials
        .find_by_identifier(&body.identifier)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !state
        .password_hasher
        .verify_password(&body.password, &credential.password_hash)?
    {
        return Err(AppError::invalid_credentials().into());
    }

    let token = state
        .token_service
        .issue_default(credential.subject_id, serde_json::Map::new())?;
    let session = state.sessions.create(credential.subject_id).await?;

    info!(subject_id = credential.subject_id, "Login succeeded");

    Ok((
        [(
            SET_COOKIE,
            cookies::session_cookie(&state.config.auth, &session.id),
        )],
        Json(LoginResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: state.token_service.default_ttl().as_secs(),
            subject_id: credential.subject_id,
        }),
    ))
}

/// `POST /api/auth/logout` — destroys the server-side session (when the
/// request carried one) and clears the cookie. Bearer tokens stay valid
/// until natural expiry.
pub async fn logout(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    if let Some(session_id) = cookies::extract_cookie(&headers, &state.config.auth.cookie_name) {
        state.sessions.destroy(&session_id).await?;
    }

    info!(subject_id = identity.subject_id, "Logout");

    Ok((
        [(SET_COOKIE, cookies::clear_session_cookie(&state.config.auth))],
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

/// `GET /api/auth/me` — returns the resolved identity of the caller.
pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<MeResponse> {
    Json(MeResponse {
        subject_id: identity.subject_id,
        source: identity.source,
        claims: identity.claims,
    })
}
