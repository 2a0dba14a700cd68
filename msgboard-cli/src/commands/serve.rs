//! HTTP server command
//!
//! Runs the message board API until Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use msgboard_server::db::{create_pool, migrations, PoolSettings};
use msgboard_server::{run_server, MemoryMessageStore, MessageStore, PgMessageStore, ServerConfig};

use super::require_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "MSGBOARD_BIND", default_value = "127.0.0.1:5555")]
    pub bind: SocketAddr,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep messages in process memory instead of PostgreSQL (lost on exit).
    /// Takes precedence over --database-url
    #[arg(long)]
    pub in_memory: bool,

    /// Don't insert the demo message into an empty board
    #[arg(long)]
    pub no_seed: bool,

    /// Maximum database connections in the pool
    #[arg(long, default_value_t = PoolSettings::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds a request waits for a free database connection before failing
    #[arg(long, default_value_t = PoolSettings::DEFAULT_ACQUIRE_TIMEOUT_SECS)]
    pub acquire_timeout_secs: u64,
}

impl ServeArgs {
    fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn MessageStore> = if args.in_memory {
        tracing::warn!("Using in-memory store - messages are lost on shutdown");
        Arc::new(MemoryMessageStore::new())
    } else {
        let settings = args.pool_settings();
        let database_url = require_database_url(args.database_url)?;

        let pool = create_pool(&database_url, settings)
            .await
            .context("Failed to create database pool")?;

        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;

        Arc::new(PgMessageStore::new(pool))
    };

    tracing::info!("Starting msgboard server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        seed_demo: !args.no_seed,
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_settings_from_flags() {
        let args = ServeArgs::parse_from([
            "serve",
            "--max-connections",
            "12",
            "--acquire-timeout-secs",
            "30",
        ]);

        assert_eq!(
            args.pool_settings(),
            PoolSettings {
                max_connections: 12,
                acquire_timeout: Duration::from_secs(30),
            }
        );
    }

    #[test]
    fn pool_settings_default() {
        let args = ServeArgs::parse_from(["serve"]);
        assert_eq!(args.pool_settings(), PoolSettings::default());
    }
}
