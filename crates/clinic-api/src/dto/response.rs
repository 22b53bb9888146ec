//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clinic_auth::LoginResult;
use clinic_core::types::{RevocationId, RoleId, UserId};
use clinic_entity::token::RevocationEntry;
use clinic_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Role ID.
    pub role_id: RoleId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role_name,
            role_id: user.role_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The created account.
    pub user: UserResponse,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub access_token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// Role name at login time.
    pub role: String,
    /// User ID.
    pub user_id: UserId,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            access_token: result.token,
            expires_at: result.expires_at,
            role: result.role,
            user_id: result.user_id,
            username: result.username,
            email: result.email,
        }
    }
}

/// Audit view of a revocation entry. The token itself is not echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationResponse {
    /// Entry ID.
    pub id: RevocationId,
    /// Owner of the revoked token.
    pub user_id: UserId,
    /// Why the token was revoked.
    pub reason: String,
    /// When the entry stops mattering.
    pub expires_at: DateTime<Utc>,
    /// When the token was revoked.
    pub revoked_at: DateTime<Utc>,
}

impl From<RevocationEntry> for RevocationResponse {
    fn from(entry: RevocationEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            reason: entry.reason,
            expires_at: entry.expires_at,
            revoked_at: entry.created_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected`, `unavailable`, or `in_memory`.
    pub database: String,
}
