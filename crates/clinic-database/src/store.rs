//! Store traits consumed by the auth core.
//!
//! Every lookup returns `AppResult<Option<T>>`: `Ok(Some)` is found,
//! `Ok(None)` is a definite absence, and `Err` is a store failure. Callers
//! must never read a failure as absence.

use async_trait::async_trait;

use clinic_core::result::AppResult;
use clinic_core::types::{PageRequest, PageResponse, RoleId, UserId};
use clinic_entity::token::{NewRevocation, RevocationEntry};
use clinic_entity::user::{CreateUser, Role, UpdateUser, User};

/// Persistent user accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user. Duplicate username or email is a `Conflict`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace a user's mutable fields. A missing user is `NotFound`.
    async fn update(&self, data: &UpdateUser) -> AppResult<User>;

    /// Delete a user. Returns `false` when no row matched.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    /// List all users, optionally filtered by a username substring.
    async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<&str>,
    ) -> AppResult<PageResponse<User>>;

    /// List users whose current role name is in `role_names`.
    async fn find_by_roles(
        &self,
        role_names: &[&str],
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>>;
}

/// Persistent role rows.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// Find a role by primary key.
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>>;

    /// List all roles ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Role>>;
}

/// Persistent set of revoked token strings.
#[async_trait]
pub trait RevocationStore: Send + Sync + 'static {
    /// Record a revocation. Inserting the same token twice is a no-op.
    ///
    /// Returns `true` when a new entry was written.
    async fn insert(&self, entry: &NewRevocation) -> AppResult<bool>;

    /// Whether a live entry (`expires_at > now`) exists for exactly `token`.
    async fn is_revoked(&self, token: &str) -> AppResult<bool>;

    /// Live entries owned by `user_id`, newest first.
    async fn list_active_by_user(&self, user_id: UserId) -> AppResult<Vec<RevocationEntry>>;

    /// Delete every entry with `expires_at <= now`. Returns the number removed.
    async fn purge_expired(&self) -> AppResult<u64>;
}
