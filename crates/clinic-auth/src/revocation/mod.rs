//! Revocation maintenance.

pub mod cleanup;

pub use cleanup::RevocationCleanup;
