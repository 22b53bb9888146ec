//! The authenticated principal attached to a request.

use serde::{Deserialize, Serialize};

use clinic_core::types::UserId;
use clinic_entity::user::User;

/// Who is making the current request.
///
/// Built from the persisted user record after token validation, so `role`
/// is the user's current role rather than the one frozen into the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The authenticated user's username.
    pub username: String,
    /// The user's current role name.
    pub role: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role_name.clone(),
        }
    }
}
