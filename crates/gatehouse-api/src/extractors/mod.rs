//! Custom Axum extractors.

pub mod auth;
pub mod validated;

pub use auth::CurrentIdentity;
pub use validated::ValidatedJson;
