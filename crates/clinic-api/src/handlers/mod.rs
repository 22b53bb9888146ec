//! Request handlers, grouped by route family.

pub mod auth;
pub mod health;
pub mod user;
