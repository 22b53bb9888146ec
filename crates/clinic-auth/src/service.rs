//! Register, login, logout, and authenticate flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use clinic_core::config::AuthConfig;
use clinic_core::error::AppError;
use clinic_core::result::AppResult;
use clinic_core::types::{RoleId, UserId};
use clinic_database::store::{CredentialStore, RevocationStore, RoleStore};
use clinic_entity::token::NewRevocation;
use clinic_entity::user::{CreateUser, User};

use crate::identity::Identity;
use crate::jwt::{TokenIssuer, TokenRejection, TokenValidator};
use crate::password::{PasswordHasher, PasswordValidator};

/// Message for every credential mismatch, so usernames cannot be probed.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Input for account registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Role to assign.
    pub role_id: RoleId,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// Signed access token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The user's role name.
    pub role: String,
    /// The user's ID.
    pub user_id: UserId,
    /// The user's username.
    pub username: String,
    /// The user's email.
    pub email: String,
}

/// Orchestrates the credential lifecycle over the stores.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    roles: Arc<dyn RoleStore>,
    revocations: Arc<dyn RevocationStore>,
    issuer: Arc<TokenIssuer>,
    validator: Arc<TokenValidator>,
    hasher: PasswordHasher,
    password_policy: PasswordValidator,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl AuthService {
    /// Creates the auth service, building its issuer and validator from `config`.
    pub fn new(
        config: &AuthConfig,
        credentials: Arc<dyn CredentialStore>,
        roles: Arc<dyn RoleStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        let issuer = Arc::new(TokenIssuer::new(config));
        let validator = Arc::new(TokenValidator::new(
            config,
            revocations.clone(),
            credentials.clone(),
        ));
        Self {
            credentials,
            roles,
            revocations,
            issuer,
            validator,
            hasher: PasswordHasher::new(),
            password_policy: PasswordValidator::new(config),
        }
    }

    /// The token validator used by [`Self::authenticate`].
    pub fn validator(&self) -> Arc<TokenValidator> {
        self.validator.clone()
    }

    /// Creates an account.
    ///
    /// Fails with `Validation` on password policy, `NotFound` on an unknown
    /// role, and `Conflict` on a taken username or email.
    pub async fn register(&self, input: RegisterUser) -> AppResult<User> {
        self.password_policy.validate(&input.password)?;

        let role = self
            .roles
            .find_by_id(input.role_id)
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        if self.credentials.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::conflict("Username already exists"));
        }
        if self.credentials.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .credentials
            .create(&CreateUser {
                username: input.username,
                email: input.email,
                password_hash,
                role_id: role.id,
            })
            .await?;

        info!(
            user_id = %user.id,
            username = %user.username,
            role = %role.name,
            "User registered"
        );
        Ok(user)
    }

    /// Verifies credentials and issues a token carrying the current role.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let Some(user) = self.credentials.find_by_username(username).await? else {
            warn!(username = %username, "Login failed: unknown username");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let issued = self.issuer.issue(
            user.id,
            &user.username,
            &user.role_name,
            self.issuer.default_ttl(),
        )?;

        info!(user_id = %user.id, username = %user.username, "Login successful");
        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            role: user.role_name,
            user_id: user.id,
            username: user.username,
            email: user.email,
        })
    }

    /// Revokes `token` until its own expiry.
    ///
    /// The token must verify and belong to `user_id`. Revoking an already
    /// revoked token succeeds.
    pub async fn logout(&self, token: &str, user_id: UserId) -> AppResult<()> {
        let claims = self
            .validator
            .decode_claims(token)
            .map_err(|_| AppError::authentication("Invalid token"))?;

        if claims.user_id() != user_id {
            warn!(
                user_id = %user_id,
                token_subject = claims.sub,
                "Logout rejected: token belongs to another user"
            );
            return Err(AppError::authorization(
                "Token does not belong to the current user",
            ));
        }

        let expires_at = claims
            .expires_at()
            .ok_or_else(|| AppError::authentication("Invalid token"))?;

        let inserted = self
            .revocations
            .insert(&NewRevocation::logout(token, expires_at, user_id))
            .await?;

        info!(user_id = %user_id, newly_revoked = inserted, "User logged out");
        Ok(())
    }

    /// Validates a token and resolves the caller's current identity.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, TokenRejection> {
        self.validator.validate(token).await
    }
}
