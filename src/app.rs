pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod inspector;
pub mod models;
pub mod records;
pub mod shell;
pub mod statements;

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use self::cli::{Cli, Command};
use self::config::resolve_config;
use self::error::{AdminError, AdminResult};
use self::records::RecordOperations;
use self::shell::Shell;

// Opens the single shared connection. Failure here is the one unrecoverable error.
pub async fn connect(db_url: &str) -> AdminResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_url)
        .map_err(|e| AdminError::Connection(e.to_string()))?
        .create_if_missing(false)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(AdminError::connection)
}

pub async fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Config
    let config = resolve_config(&args)?;

    // 3. Connect
    let pool = connect(&config.db_url)
        .await
        .context("Failed to connect to database")?;
    info!(db = %config.db_name, "connected");
    let ops = RecordOperations::new(pool.clone(), config.ignore_tables.clone());

    // 4. Dispatch
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut shell = Shell::new(&ops, &config, stdin, stdout);
    let outcome = shell.execute(args.command.unwrap_or(Command::Menu)).await;

    pool.close().await;
    outcome
}
