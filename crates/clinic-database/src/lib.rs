//! # clinic-database
//!
//! Persistence for the auth core. The [`store`] module defines the traits the
//! auth core consumes; [`repositories`] implements them over PostgreSQL and
//! [`memory`] implements them in-process for tests and single-node tooling.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::{DatabasePool, DatabaseStatus};
pub use store::{CredentialStore, RevocationStore, RoleStore};
