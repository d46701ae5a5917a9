//! Signed bearer token issuance and verification.

pub mod claims;
pub mod service;

pub use claims::TokenClaims;
pub use service::TokenService;
