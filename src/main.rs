//! SIM Clinic Server: authentication and account management API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use clinic_auth::RevocationCleanup;
use clinic_core::config::AppConfig;
use clinic_core::error::AppError;
use clinic_database::DatabasePool;
use clinic_database::repositories::RevokedTokenRepository;
use clinic_worker::RevocationPurgeScheduler;

#[tokio::main]
async fn main() {
    let environment = std::env::var("CLINIC_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&environment) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&environment, config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(environment: &str, config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SIM Clinic v{} ({})", env!("CARGO_PKG_VERSION"), environment);

    config.auth.check_signing_secret(environment)?;

    let db_pool = DatabasePool::connect(&config.database).await?;
    clinic_database::migration::run_migrations(db_pool.pool()).await?;

    let mut scheduler = if config.worker.enabled {
        let revocations = Arc::new(RevokedTokenRepository::new(db_pool.pool().clone()));
        let cleanup = Arc::new(RevocationCleanup::new(revocations));
        let scheduler = RevocationPurgeScheduler::new(cleanup).await?;
        scheduler.register(&config.worker).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Scheduled maintenance disabled");
        None
    };

    let result = clinic_api::run_server(config, db_pool.clone()).await;

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("Scheduler shutdown failed: {}", e);
        }
    }
    db_pool.close().await;

    result
}
