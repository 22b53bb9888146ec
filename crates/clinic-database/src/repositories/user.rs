//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use clinic_core::error::{AppError, ErrorKind};
use clinic_core::result::AppResult;
use clinic_core::types::{PageRequest, PageResponse, UserId};
use clinic_entity::user::{CreateUser, UpdateUser, User};

use crate::store::CredentialStore;

/// Projection joining the current role name onto every user row.
const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password_hash, u.role_id, \
     r.name AS role_name, u.created_at, u.updated_at";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str, what: &str) -> AppResult<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id WHERE {filter}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to find user by {what}"), e)
            })
    }
}

/// Map unique and foreign-key violations to domain errors.
fn map_write_error(e: sqlx::Error, username: &str, email: &str, action: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        match db_err.constraint() {
            Some("users_username_key") => {
                return AppError::conflict(format!("Username '{username}' already exists"));
            }
            Some("users_email_key") => {
                return AppError::conflict(format!("Email '{email}' already exists"));
            }
            Some("users_role_id_fkey") => return AppError::not_found("Role not found"),
            _ => {}
        }
    }
    AppError::with_source(ErrorKind::Database, format!("Failed to {action} user"), e)
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let sql =
            format!("SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.find_one("u.username = $1", username, "username").await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_one("u.email = $1", email, "email").await
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let sql = format!(
            "WITH u AS ( \
                INSERT INTO users (username, email, password_hash, role_id) \
                VALUES ($1, $2, $3, $4) RETURNING * \
             ) \
             SELECT {USER_COLUMNS} FROM u JOIN roles r ON r.id = u.role_id"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(data.role_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &data.username, &data.email, "create"))
    }

    async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        let sql = format!(
            "WITH u AS ( \
                UPDATE users SET username = $2, email = $3, \
                    password_hash = COALESCE($4, password_hash), role_id = $5, updated_at = NOW() \
                WHERE id = $1 RETURNING * \
             ) \
             SELECT {USER_COLUMNS} FROM u JOIN roles r ON r.id = u.role_id"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(data.id)
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(data.role_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &data.username, &data.email, "update"))?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<&str>,
    ) -> AppResult<PageResponse<User>> {
        let pattern = search
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE ($1::TEXT IS NULL OR username LIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE ($1::TEXT IS NULL OR u.username LIKE $1) \
             ORDER BY u.id ASC LIMIT $2 OFFSET $3"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(&pattern)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(users, page, total as u64))
    }

    async fn find_by_roles(
        &self,
        role_names: &[&str],
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let names: Vec<String> = role_names.iter().map(|n| n.to_string()).collect();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users u JOIN roles r ON r.id = u.role_id WHERE r.name = ANY($1)",
        )
        .bind(&names)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count users by role", e)
        })?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE r.name = ANY($1) ORDER BY u.id ASC LIMIT $2 OFFSET $3"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(&names)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list users by role", e)
            })?;

        Ok(PageResponse::new(users, page, total as u64))
    }
}
