//! petfamily CLI
//!
//! Entry point for the `petfamily` binary:
//! - `serve` runs the HTTP API (optionally bootstrapping the schema first)
//! - `migrate` creates any missing tables and exits

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::{LogFormat, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "petfamily",
    author,
    version,
    about = "Pet boarding backend: users, lodgings, contracts and pets over a REST API"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Path to a TOML config file (default: ./petfamily.toml when present)
    #[arg(long, global = true, env = "PETFAMILY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema (idempotent)
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        format: cli.log_format,
    })
    .ok();

    let file = config::FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &file).await?,
        Commands::Migrate(args) => commands::run_migrate(args, &file).await?,
    }

    Ok(())
}
