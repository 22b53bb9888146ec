//! Revoked token repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use clinic_core::error::{AppError, ErrorKind};
use clinic_core::result::AppResult;
use clinic_core::types::UserId;
use clinic_entity::token::{NewRevocation, RevocationEntry};

use crate::store::RevocationStore;

/// Repository for the `blacklisted_tokens` table.
#[derive(Debug, Clone)]
pub struct RevokedTokenRepository {
    pool: PgPool,
}

impl RevokedTokenRepository {
    /// Create a new revoked token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationStore for RevokedTokenRepository {
    async fn insert(&self, entry: &NewRevocation) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO blacklisted_tokens (token, expires_at, user_id, reason) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (token) DO NOTHING",
        )
        .bind(&entry.token)
        .bind(entry.expires_at)
        .bind(entry.user_id)
        .bind(&entry.reason)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM blacklisted_tokens WHERE token = $1 AND expires_at > NOW())",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check token revocation", e)
        })
    }

    async fn list_active_by_user(&self, user_id: UserId) -> AppResult<Vec<RevocationEntry>> {
        sqlx::query_as::<_, RevocationEntry>(
            "SELECT * FROM blacklisted_tokens WHERE user_id = $1 AND expires_at > NOW() \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list revoked tokens", e)
        })
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM blacklisted_tokens WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge revoked tokens", e)
            })?;
        Ok(result.rows_affected())
    }
}
