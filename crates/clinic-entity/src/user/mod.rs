//! User and role entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, UpdateUser, User};
pub use role::Role;
