//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clinic_core::types::{RoleId, UserId};

/// A registered clinic user.
///
/// `role_name` is joined from the `roles` table on every read, so it always
/// reflects the user's current role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Assigned role key.
    pub role_id: RoleId,
    /// Name of the assigned role.
    pub role_name: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role_id: RoleId,
}

/// Full replacement of a user's mutable fields.
///
/// `password_hash` is `None` when the password is unchanged.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    /// The user to update.
    pub id: UserId,
    /// New username.
    pub username: String,
    /// New email.
    pub email: String,
    /// New password hash, if the password changes.
    pub password_hash: Option<String>,
    /// New role.
    pub role_id: RoleId,
}
