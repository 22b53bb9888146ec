//! Purge of dead revocation entries.

use std::sync::Arc;

use tracing::info;

use clinic_core::error::AppError;
use clinic_database::store::RevocationStore;

/// Deletes revocation entries whose tokens have expired on their own.
///
/// Safe to run concurrently with validation and with other cleanups.
#[derive(Clone)]
pub struct RevocationCleanup {
    revocations: Arc<dyn RevocationStore>,
}

impl std::fmt::Debug for RevocationCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationCleanup").finish()
    }
}

impl RevocationCleanup {
    /// Creates a new cleanup handler.
    pub fn new(revocations: Arc<dyn RevocationStore>) -> Self {
        Self { revocations }
    }

    /// Runs one purge cycle and returns the number of entries removed.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let purged = self.revocations.purge_expired().await?;
        if purged > 0 {
            info!(purged = purged, "Purged expired revocation entries");
        }
        Ok(purged)
    }
}
