//! Role CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use clinic_auth::rbac::rank;
use clinic_core::error::AppError;
use clinic_database::DatabasePool;
use clinic_database::repositories::RoleRepository;
use clinic_database::store::RoleStore;

use crate::output::{self, OutputFormat};

/// Arguments for role commands
#[derive(Debug, Args)]
pub struct RoleArgs {
    /// Role subcommand
    #[command(subcommand)]
    pub command: RoleCommand,
}

/// Role subcommands
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// List stored roles with their hierarchy rank
    List,
}

/// Role display row
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Role ID
    id: i64,
    /// Name
    name: String,
    /// Rank in the hierarchy, `-` when unranked
    rank: String,
    /// Description
    description: String,
}

/// Execute role commands
pub async fn execute(args: &RoleArgs, pool: &DatabasePool, format: OutputFormat) -> Result<(), AppError> {
    let repo = RoleRepository::new(pool.pool().clone());

    match &args.command {
        RoleCommand::List => {
            let rows: Vec<RoleRow> = repo
                .find_all()
                .await?
                .into_iter()
                .map(|role| RoleRow {
                    id: role.id.into_inner(),
                    rank: rank(&role.name).map_or_else(|| "-".to_string(), |r| r.to_string()),
                    name: role.name,
                    description: role.description,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
