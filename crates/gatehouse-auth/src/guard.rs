//! Route admission policy.
//!
//! The decision is a pure function of the route's mode and whether the
//! request resolved an identity. Identity resolution happens elsewhere
//! (bearer header or session cookie); the guard only judges the result,
//! which keeps the two failure directions symmetric and easy to test.

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::types::Identity;

/// Admission mode attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardMode {
    /// Anyone may pass; an identity is attached when present.
    #[default]
    Public,
    /// Only requests carrying a valid identity may pass.
    AuthRequired,
    /// Only requests carrying no identity may pass (login, register).
    GuestOnly,
}

/// Judges a resolved identity against the route's mode.
///
/// On success the identity (when any) is handed back for the route to
/// attach to the request.
pub fn decide(mode: GuardMode, identity: Option<Identity>) -> AppResult<Option<Identity>> {
    match (mode, identity) {
        (GuardMode::AuthRequired, None) => Err(AppError::unauthorized("Authentication required")),
        (GuardMode::GuestOnly, Some(_)) => Err(AppError::forbidden("Already authenticated")),
        (_, identity) => Ok(identity),
    }
}
