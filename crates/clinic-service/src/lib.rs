//! # clinic-service
//!
//! Business logic for account management. Every operation takes the
//! caller's [`clinic_auth::Identity`] and consults the
//! [`clinic_auth::PermissionEvaluator`] before touching the stores.

pub mod user;

pub use user::{UpdateUserInput, UserService};
