//! CLI command definitions and dispatch.

pub mod migrate;
pub mod revocation;
pub mod role;

use clap::{Parser, Subcommand};

use clinic_core::config::AppConfig;
use clinic_core::error::AppError;
use clinic_database::DatabasePool;

use crate::output::OutputFormat;

/// SIM Clinic administration tool
#[derive(Debug, Parser)]
#[command(name = "clinic-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads `config/{env}.toml` over the defaults)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Inspect and purge token revocations
    Revocations(revocation::RevocationArgs),
    /// Inspect roles
    Roles(role::RoleArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.env)?;
        let pool = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate => migrate::execute(&pool).await,
            Commands::Revocations(args) => revocation::execute(args, &pool, self.format).await,
            Commands::Roles(args) => role::execute(args, &pool, self.format).await,
        };

        pool.close().await;
        result
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}
