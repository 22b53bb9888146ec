//! PostgreSQL pool shared by the server, the CLI, and the health probe.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

use clinic_core::config::DatabaseConfig;
use clinic_core::error::{AppError, ErrorKind};
use clinic_core::result::AppResult;

/// Reachability reported by [`DatabasePool::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    /// `SELECT 1` round-tripped.
    Connected,
    /// The probe query failed.
    Unavailable,
}

impl DatabaseStatus {
    /// Label used in health responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Cloneable handle to the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Validates the configuration, then opens the pool eagerly so a bad
    /// URL or unreachable server fails startup.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let (options, pool_options) = pool_settings(config)?;

        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or("-"),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool, e.g. one provisioned by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying sqlx pool handed to repositories and migrations.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Probes the database with `SELECT 1`.
    pub async fn status(&self) -> DatabaseStatus {
        match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => DatabaseStatus::Connected,
            Err(e) => {
                warn!(error = %e, "Database health probe failed");
                DatabaseStatus::Unavailable
            }
        }
    }

    /// Drains the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Parses the URL and checks pool bounds without touching the network.
fn pool_settings(config: &DatabaseConfig) -> AppResult<(PgConnectOptions, PgPoolOptions)> {
    if config.max_connections == 0 {
        return Err(AppError::configuration(
            "database.max_connections must be at least 1",
        ));
    }
    if config.min_connections > config.max_connections {
        return Err(AppError::configuration(format!(
            "database.min_connections ({}) exceeds database.max_connections ({})",
            config.min_connections, config.max_connections
        )));
    }

    // The URL may carry a password, so it is never echoed back.
    let options = PgConnectOptions::from_str(&config.url)
        .map_err(|_| AppError::configuration("database.url is not a valid PostgreSQL URL"))?;

    let pool_options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

    Ok((options, pool_options))
}
