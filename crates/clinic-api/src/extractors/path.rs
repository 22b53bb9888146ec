//! Typed path parameter helpers.

use clinic_core::error::AppError;
use clinic_core::types::UserId;

/// Parses a user ID from a path segment.
pub fn parse_user_id(s: &str) -> Result<UserId, AppError> {
    s.parse::<UserId>()
        .ok()
        .filter(|id| id.into_inner() > 0)
        .ok_or_else(|| AppError::validation(format!("Invalid user ID: {s}")))
}
