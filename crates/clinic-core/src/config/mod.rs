//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate, overlaid with `CLINIC__`-prefixed environment variables.
//! Each sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`default.toml` + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Background maintenance settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, the environment-specific overlay
    /// `config/{env}.toml`, and environment variables prefixed with `CLINIC__`
    /// (for example `CLINIC__AUTH__JWT_SECRET`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CLINIC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
