//! Unified application error types for Gatehouse.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The kind taxonomy distinguishes
//! failures for logging even when clients see a collapsed status (every
//! token failure surfaces as 401, for example).

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Login failed; message stays generic by policy.
    InvalidCredentials,
    /// No identity, or an identity that could not be accepted, on a route that requires one.
    Unauthorized,
    /// A resolved identity is not allowed here (e.g. authenticated user on a guest route).
    Forbidden,
    /// The bearer token's lifetime has elapsed.
    TokenExpired,
    /// The bearer token's signature does not verify.
    InvalidSignature,
    /// The bearer token could not be parsed at all.
    MalformedToken,
    /// The session's TTL has elapsed.
    SessionExpired,
    /// A rate limit was exceeded.
    RateLimited,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate identifier, concurrent modification).
    Conflict,
    /// The requested resource was not found.
    NotFound,
    /// A shared-store error occurred.
    Store,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::InvalidSignature => write!(f, "INVALID_SIGNATURE"),
            Self::MalformedToken => write!(f, "MALFORMED_TOKEN"),
            Self::SessionExpired => write!(f, "SESSION_EXPIRED"),
            Self::RateLimited => write!(f, "RATE_LIMITED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Store => write!(f, "STORE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl ErrorKind {
    /// Whether this kind is surfaced to clients as an authentication failure.
    ///
    /// Token and session failures keep their kind for logging but collapse
    /// to a 401 at the HTTP boundary.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::Unauthorized
                | Self::TokenExpired
                | Self::InvalidSignature
                | Self::MalformedToken
                | Self::SessionExpired
        )
    }
}

/// The unified application error used throughout Gatehouse.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls, giving a single error type at the
/// application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Per-field messages for validation failures; empty otherwise.
    pub details: Vec<String>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            details: Vec::new(),
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
            details: Vec::new(),
        }
    }

    /// Create an invalid-credentials error with the fixed generic message.
    ///
    /// Never reveals whether the identifier or the password was wrong.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "invalid identifier or password")
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a rate-limited error with the fixed envelope message.
    pub fn rate_limited() -> Self {
        Self::new(ErrorKind::RateLimited, "rate limit exceeded")
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a validation error carrying per-field messages.
    pub fn validation_fields(message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            source: None,
            details,
        }
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a shared-store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
            details: self.details.clone(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
