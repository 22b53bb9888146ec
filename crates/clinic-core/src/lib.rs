//! # clinic-core
//!
//! Core crate for the SIM Clinic backend. Contains configuration schemas,
//! typed identifiers, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other clinic crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
