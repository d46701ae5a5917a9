//! # gatehouse-store
//!
//! Shared-store provider implementations for Gatehouse. Supports two modes:
//!
//! - **memory**: In-process store using [dashmap](https://crates.io/crates/dashmap)
//!   with lazy per-entry expiry; single-node only, used in tests and demos
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis)
//!   crate, shared across all server processes
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
