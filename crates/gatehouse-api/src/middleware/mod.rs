//! Axum middleware stack.
//!
//! Order matters: the error boundary is outermost so every failure,
//! wherever it arises, leaves the process as the standard envelope.
//! Inside it run logging, rate limiting, then the guard; handlers see
//! only admitted requests.

pub mod error_boundary;
pub mod guard;
pub mod logging;
pub mod rate_limit;
