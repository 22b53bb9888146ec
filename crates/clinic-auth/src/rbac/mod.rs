//! Role hierarchy and permission decisions.

pub mod evaluator;
pub mod hierarchy;

pub use evaluator::PermissionEvaluator;
pub use hierarchy::{ROLE_ADMIN, ROLE_HIERARCHY, ROLE_SUPER_ADMIN, ROLE_USER, rank};
