//! # clinic-entity
//!
//! Domain entity models for the SIM Clinic auth core. Every struct in this
//! crate represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod token;
pub mod user;
