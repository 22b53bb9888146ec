//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clinic_core::types::RoleId;

/// A named role row (`super_admin`, `admin`, `user`).
///
/// Ranking lives in the authorization layer; a role stored here without a
/// rank is treated as having no privileges.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: RoleId,
    /// Unique role name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}
