//! # gatehouse-auth
//!
//! The admission components of Gatehouse: everything that decides whether a
//! request may proceed before business logic runs.
//!
//! ## Modules
//!
//! - `password` — Argon2id credential hashing and verification
//! - `token` — signed bearer token issuance and verification
//! - `session` — opaque server-side sessions over the shared store
//! - `limiter` — distributed fixed-window rate limiting
//! - `guard` — guest/authenticated admission policy
//! - `credentials` — in-memory credential repository for tests and demos

pub mod credentials;
pub mod guard;
pub mod limiter;
pub mod password;
pub mod session;
pub mod token;

pub use guard::{GuardMode, decide};
pub use limiter::{FixedWindowLimiter, LimitDecision};
pub use password::PasswordHasher;
pub use session::SessionStore;
pub use token::{TokenClaims, TokenService};
