//! List, view, update, and delete accounts under the role hierarchy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use clinic_auth::rbac::hierarchy::{ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER, roles_at_or_below};
use clinic_auth::{Identity, PasswordHasher, PasswordValidator, PermissionEvaluator};
use clinic_core::config::AuthConfig;
use clinic_core::error::AppError;
use clinic_core::result::AppResult;
use clinic_core::types::{PageRequest, PageResponse, RoleId, UserId};
use clinic_database::store::{CredentialStore, RevocationStore, RoleStore};
use clinic_entity::token::RevocationEntry;
use clinic_entity::user::{UpdateUser, User};

/// Partial update of an account. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserInput {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
    /// New role.
    pub role_id: Option<RoleId>,
}

/// Account management service.
#[derive(Clone)]
pub struct UserService {
    credentials: Arc<dyn CredentialStore>,
    roles: Arc<dyn RoleStore>,
    revocations: Arc<dyn RevocationStore>,
    evaluator: PermissionEvaluator,
    hasher: PasswordHasher,
    password_policy: PasswordValidator,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        config: &AuthConfig,
        credentials: Arc<dyn CredentialStore>,
        roles: Arc<dyn RoleStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        Self {
            credentials,
            roles,
            revocations,
            evaluator: PermissionEvaluator::new(),
            hasher: PasswordHasher::new(),
            password_policy: PasswordValidator::new(config),
        }
    }

    /// Lists the accounts visible to the caller.
    ///
    /// Super admins see everyone and may filter by username; admins see
    /// admins and users; users may not list accounts.
    pub async fn list(
        &self,
        ctx: &Identity,
        page: &PageRequest,
        search: Option<&str>,
    ) -> AppResult<PageResponse<User>> {
        let result = match ctx.role.as_str() {
            ROLE_SUPER_ADMIN => self.credentials.find_all(page, search).await?,
            ROLE_ADMIN => {
                let visible = roles_at_or_below(ROLE_ADMIN);
                self.credentials.find_by_roles(&visible, page).await?
            }
            ROLE_USER => {
                return Err(AppError::authorization(
                    "Access denied: insufficient permissions",
                ));
            }
            _ => return Err(AppError::validation("Invalid user role")),
        };

        info!(
            user_id = %ctx.user_id,
            role = %ctx.role,
            returned = result.items.len(),
            total = result.total_items,
            "Listed users"
        );
        Ok(result)
    }

    /// Fetches one account the caller may view.
    pub async fn get(&self, ctx: &Identity, id: UserId) -> AppResult<User> {
        let target = self.find_target(id).await?;
        self.evaluator.require_read(&ctx.role, &target.role_name)?;
        Ok(target)
    }

    /// Applies a partial update to an account the caller may manage.
    pub async fn update(
        &self,
        ctx: &Identity,
        id: UserId,
        input: UpdateUserInput,
    ) -> AppResult<User> {
        let target = self.find_target(id).await?;
        self.evaluator
            .require_update(&ctx.role, ctx.user_id, &target.role_name, target.id)?;

        let mut role_id = target.role_id;
        if let Some(new_role_id) = input.role_id.filter(|r| *r != target.role_id) {
            let role = self
                .roles
                .find_by_id(new_role_id)
                .await?
                .ok_or_else(|| AppError::not_found("Role not found"))?;
            self.evaluator.require_assign_role(&ctx.role, &role.name)?;
            role_id = role.id;
        }

        let username = match input.username {
            Some(username) if username != target.username => {
                if let Some(existing) = self.credentials.find_by_username(&username).await? {
                    if existing.id != id {
                        return Err(AppError::conflict("Username already exists"));
                    }
                }
                username
            }
            _ => target.username,
        };

        let email = match input.email {
            Some(email) if email != target.email => {
                if let Some(existing) = self.credentials.find_by_email(&email).await? {
                    if existing.id != id {
                        return Err(AppError::conflict("Email already exists"));
                    }
                }
                email
            }
            _ => target.email,
        };

        let password_hash = match input.password {
            Some(password) => {
                self.password_policy.validate(&password)?;
                Some(self.hasher.hash_password(&password)?)
            }
            None => None,
        };

        let updated = self
            .credentials
            .update(&UpdateUser {
                id,
                username,
                email,
                password_hash,
                role_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            target_id = %id,
            role = %updated.role_name,
            "User updated"
        );
        Ok(updated)
    }

    /// Deletes an account the caller may remove. Self-deletion is refused.
    pub async fn delete(&self, ctx: &Identity, id: UserId) -> AppResult<()> {
        let target = self.find_target(id).await?;
        self.evaluator
            .require_delete(&ctx.role, ctx.user_id, &target.role_name, target.id)?;

        if !self.credentials.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %ctx.user_id, target_id = %id, "User deleted");
        Ok(())
    }

    /// Live revocation entries of an account the caller may manage.
    pub async fn list_revocations(
        &self,
        ctx: &Identity,
        id: UserId,
    ) -> AppResult<Vec<RevocationEntry>> {
        let target = self.find_target(id).await?;
        self.evaluator
            .require_update(&ctx.role, ctx.user_id, &target.role_name, target.id)?;
        self.revocations.list_active_by_user(id).await
    }

    async fn find_target(&self, id: UserId) -> AppResult<User> {
        self.credentials
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
