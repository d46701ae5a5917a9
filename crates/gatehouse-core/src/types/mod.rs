//! Domain types for the admission core.

pub mod credential;
pub mod identity;
pub mod session;

pub use credential::{Credential, SubjectId};
pub use identity::{Identity, IdentitySource};
pub use session::Session;
