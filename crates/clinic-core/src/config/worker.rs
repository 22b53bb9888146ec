//! Background maintenance configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether scheduled maintenance runs inside the server process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression (with seconds) for purging dead revocation entries.
    #[serde(default = "default_purge_cron")]
    pub revocation_purge_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            revocation_purge_cron: default_purge_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_purge_cron() -> String {
    "0 */15 * * * *".to_string()
}
