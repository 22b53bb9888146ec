//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod path;
pub mod validated;

pub use auth::{AuthUser, BearerToken};
pub use pagination::ListUsersQuery;
pub use path::parse_user_id;
pub use validated::ValidatedJson;
