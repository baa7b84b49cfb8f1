//! Migrate command - Index management for the users collection.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_indexes(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Ensuring indexes...");
            db.ensure_indexes().await?;
            tracing::info!("Indexes are up to date");
        }
        MigrateAction::Status => {
            let names = db.index_names().await?;
            if names.is_empty() {
                tracing::info!("users collection has no indexes yet");
            }
            for name in names {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
