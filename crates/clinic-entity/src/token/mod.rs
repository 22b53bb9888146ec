//! Token-related entities.

pub mod revocation;

pub use revocation::{NewRevocation, RevocationEntry};
