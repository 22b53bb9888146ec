//! Role repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use clinic_core::error::{AppError, ErrorKind};
use clinic_core::result::AppResult;
use clinic_core::types::RoleId;
use clinic_entity::user::Role;

use crate::store::RoleStore;

/// Repository for role lookups.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role by id", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }
}
