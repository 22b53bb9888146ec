//! In-memory store implementations using Tokio mutexes.
//!
//! Suitable for tests and single-node tooling only; nothing is persisted.

pub mod credential;
pub mod revocation;
pub mod role;

pub use credential::MemoryCredentialStore;
pub use revocation::MemoryRevocationStore;
pub use role::MemoryRoleStore;
