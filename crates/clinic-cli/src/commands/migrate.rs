//! Database migration command.

use clinic_core::error::AppError;
use clinic_database::DatabasePool;

use crate::output;

/// Apply all pending migrations, including the role seed.
pub async fn execute(pool: &DatabasePool) -> Result<(), AppError> {
    println!("Running database migrations...");
    clinic_database::migration::run_migrations(pool.pool()).await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
