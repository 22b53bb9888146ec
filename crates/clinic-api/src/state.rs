//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use clinic_auth::AuthService;
use clinic_core::config::AppConfig;
use clinic_database::DatabasePool;
use clinic_database::store::{CredentialStore, RevocationStore, RoleStore};
use clinic_service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when running over in-memory stores
    pub db_pool: Option<DatabasePool>,
    /// Register, login, logout, and token authentication
    pub auth_service: Arc<AuthService>,
    /// Account management under the role hierarchy
    pub user_service: Arc<UserService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("has_database", &self.db_pool.is_some())
            .finish()
    }
}

impl AppState {
    /// Wires the services over the given stores.
    pub fn new(
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
        roles: Arc<dyn RoleStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(
            &config.auth,
            Arc::clone(&credentials),
            Arc::clone(&roles),
            Arc::clone(&revocations),
        ));
        let user_service = Arc::new(UserService::new(
            &config.auth,
            credentials,
            roles,
            revocations,
        ));

        Self {
            config: Arc::new(config),
            db_pool: None,
            auth_service,
            user_service,
        }
    }

    /// Attaches the database pool used by the health endpoint.
    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
