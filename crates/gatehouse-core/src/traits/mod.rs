//! Trait definitions shared across Gatehouse crates.

pub mod repository;
pub mod store;

pub use repository::CredentialRepository;
pub use store::{CounterSlot, SharedStore};
