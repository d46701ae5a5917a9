//! # gatehouse-api
//!
//! HTTP admission pipeline for Gatehouse built on Axum.
//!
//! Every request runs the same pipeline: rate limit, guard, validation,
//! handler, then the outermost error boundary which standardizes every
//! failure into one JSON envelope.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
