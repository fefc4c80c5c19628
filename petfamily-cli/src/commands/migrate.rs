//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use petfamily_server::db::{create_pool_with_settings, migrations};

use super::serve::{resolve_database_url, resolve_pool};
use crate::config::FileConfig;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create any missing tables, then close the pool.
pub async fn run_migrate(args: MigrateArgs, file: &FileConfig) -> Result<()> {
    let database_url = resolve_database_url(args.database_url, file)?;
    let settings = resolve_pool(None, None, None, file);

    let pool = create_pool_with_settings(&database_url, &settings)
        .await
        .context("Failed to connect to database")?;

    migrations::run(&pool)
        .await
        .context("Failed to bootstrap database schema")?;

    pool.close().await;
    println!("Schema is up to date ({} tables)", migrations::SCHEMA.len());
    Ok(())
}
