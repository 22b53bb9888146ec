//! Cron scheduler for the revocation purge.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use clinic_auth::RevocationCleanup;
use clinic_core::config::WorkerConfig;
use clinic_core::error::AppError;

/// Runs [`RevocationCleanup::run_cleanup`] on a cron schedule.
pub struct RevocationPurgeScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Purge handler invoked on every tick
    cleanup: Arc<RevocationCleanup>,
}

impl std::fmt::Debug for RevocationPurgeScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationPurgeScheduler").finish()
    }
}

impl RevocationPurgeScheduler {
    /// Create a new scheduler around `cleanup`
    pub async fn new(cleanup: Arc<RevocationCleanup>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, cleanup })
    }

    /// Register the purge job with the configured cron expression
    pub async fn register(&self, config: &WorkerConfig) -> Result<(), AppError> {
        let cron = config.revocation_purge_cron.as_str();
        let cleanup = Arc::clone(&self.cleanup);
        let job = CronJob::new_async(cron, move |_uuid, _lock| {
            let cleanup = Arc::clone(&cleanup);
            Box::pin(async move {
                tracing::debug!("Running revocation purge");
                if let Err(e) = cleanup.run_cleanup().await {
                    tracing::error!("Revocation purge failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid revocation purge schedule '{}': {}",
                cron, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add revocation purge schedule: {}", e))
        })?;

        tracing::info!(cron = %cron, "Registered: revocation_purge");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
