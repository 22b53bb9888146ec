//! Token revocation CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use clinic_auth::RevocationCleanup;
use clinic_core::error::AppError;
use clinic_core::types::UserId;
use clinic_database::DatabasePool;
use clinic_database::repositories::RevokedTokenRepository;
use clinic_database::store::RevocationStore;
use clinic_entity::token::RevocationEntry;

use crate::output::{self, OutputFormat};

/// Arguments for revocation commands
#[derive(Debug, Args)]
pub struct RevocationArgs {
    /// Revocation subcommand
    #[command(subcommand)]
    pub command: RevocationCommand,
}

/// Revocation subcommands
#[derive(Debug, Subcommand)]
pub enum RevocationCommand {
    /// List live revocations for a user
    List {
        /// Owner of the revoked tokens
        #[arg(long)]
        user_id: i64,
    },
    /// Delete entries whose tokens have already expired
    Purge,
}

/// Revocation display row
#[derive(Debug, Serialize, Tabled)]
struct RevocationRow {
    /// Entry ID
    id: i64,
    /// User ID
    user_id: i64,
    /// Reason
    reason: String,
    /// Revoked at
    revoked_at: String,
    /// Expires
    expires: String,
}

impl From<RevocationEntry> for RevocationRow {
    fn from(entry: RevocationEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            user_id: entry.user_id.into_inner(),
            reason: entry.reason,
            revoked_at: entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            expires: entry.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute revocation commands
pub async fn execute(
    args: &RevocationArgs,
    pool: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let repo = Arc::new(RevokedTokenRepository::new(pool.pool().clone()));

    match &args.command {
        RevocationCommand::List { user_id } => {
            let entries = repo.list_active_by_user(UserId::new(*user_id)).await?;
            let rows: Vec<RevocationRow> = entries.into_iter().map(RevocationRow::from).collect();
            output::print_list(&rows, format);
        }
        RevocationCommand::Purge => {
            let purged = RevocationCleanup::new(repo).run_cleanup().await?;
            output::print_success(&format!("Purged {} expired revocation entries.", purged));
        }
    }

    Ok(())
}
