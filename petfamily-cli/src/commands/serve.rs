//! HTTP server command
//!
//! Settings resolve in order: command-line flag, environment variable,
//! config file, built-in default.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use petfamily_server::db::{create_pool_with_settings, migrations, PoolSettings};
use petfamily_server::http::{run_server, ServerConfig};

use crate::config::FileConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3000)
    #[arg(long, short = 'b', env = "PETFAMILY_BIND")]
    pub bind: Option<SocketAddr>,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections (default: 20)
    #[arg(long, env = "PETFAMILY_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Seconds to wait for a free connection before failing a request (default: 2)
    #[arg(long, env = "PETFAMILY_ACQUIRE_TIMEOUT_SECS")]
    pub acquire_timeout_secs: Option<u64>,

    /// Seconds an idle connection stays open (default: 30)
    #[arg(long, env = "PETFAMILY_IDLE_TIMEOUT_SECS")]
    pub idle_timeout_secs: Option<u64>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Create missing tables before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Everything `serve` needs once flags, env and file are merged.
#[derive(Debug)]
pub struct ServeSettings {
    pub database_url: String,
    pub pool: PoolSettings,
    pub server: ServerConfig,
    pub migrate: bool,
}

impl ServeArgs {
    pub fn resolve(self, file: &FileConfig) -> Result<ServeSettings> {
        let database_url = resolve_database_url(self.database_url, file)?;
        let pool = resolve_pool(
            self.max_connections,
            self.acquire_timeout_secs,
            self.idle_timeout_secs,
            file,
        );

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            bind_addr: self.bind.or(file.server.bind).unwrap_or(defaults.bind_addr),
            cors_permissive: self.cors_permissive
                || file.server.cors_permissive.unwrap_or(defaults.cors_permissive),
        };

        Ok(ServeSettings {
            database_url,
            pool,
            server,
            migrate: self.migrate,
        })
    }
}

pub(crate) fn resolve_database_url(flag: Option<String>, file: &FileConfig) -> Result<String> {
    flag.or_else(|| file.database.url.clone())
        .filter(|url| !url.trim().is_empty())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env or petfamily.toml")
}

pub(crate) fn resolve_pool(
    max_connections: Option<u32>,
    acquire_timeout_secs: Option<u64>,
    idle_timeout_secs: Option<u64>,
    file: &FileConfig,
) -> PoolSettings {
    let defaults = PoolSettings::default();
    PoolSettings {
        max_connections: max_connections
            .or(file.database.max_connections)
            .unwrap_or(defaults.max_connections),
        acquire_timeout: acquire_timeout_secs
            .or(file.database.acquire_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.acquire_timeout),
        idle_timeout: idle_timeout_secs
            .or(file.database.idle_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.idle_timeout),
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, file: &FileConfig) -> Result<()> {
    let settings = args.resolve(file)?;

    tracing::info!(
        bind = %settings.server.bind_addr,
        max_connections = settings.pool.max_connections,
        "Starting petfamily server"
    );

    let pool = create_pool_with_settings(&settings.database_url, &settings.pool)
        .await
        .context("Failed to create database pool")?;

    if settings.migrate {
        migrations::run(&pool)
            .await
            .context("Failed to bootstrap database schema")?;
    }

    // Blocks until shutdown
    run_server(pool, settings.server)
        .await
        .context("Server error")?;

    Ok(())
}
