//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use msgboard_server::db::{create_pool, migrations, PoolSettings};

use super::require_database_url;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the messages table if it doesn't exist, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = require_database_url(args.database_url)?;

    let pool = create_pool(&database_url, PoolSettings::default())
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
