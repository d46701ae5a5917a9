//! Request DTOs with declarative validation.
//!
//! Validation runs inside the `ValidatedJson` extractor before the handler
//! body executes; a failure short-circuits with per-field messages.

use serde::Deserialize;
use validator::Validate;

/// Body of `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 64,
        message = "identifier must be between 3 and 64 characters"
    ))]
    pub identifier: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "identifier must not be empty"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}
