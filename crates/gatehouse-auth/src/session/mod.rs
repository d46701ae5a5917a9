//! Opaque server-side sessions.

pub mod store;

pub use store::SessionStore;
