//! Credential repository implementations.

pub mod memory;

pub use memory::MemoryCredentialRepository;
