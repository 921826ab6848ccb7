use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tablero::RecordOperations;
use tablero::app::cli::OutputFormat;
use tablero::AppConfig;

const FIXTURE: &[&str] = &[
    "CREATE TABLE Location (idLocation INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)",
    "CREATE TABLE Machine (
        idMachine INTEGER PRIMARY KEY,
        model TEXT NOT NULL,
        idLocation INTEGER REFERENCES Location(idLocation)
    )",
    "CREATE TABLE AuditLog (message TEXT, level TEXT)",
    "CREATE TABLE Reading (id INTEGER PRIMARY KEY AUTOINCREMENT, value REAL, payload BLOB)",
];

// One connection that never expires, so the in-memory database outlives each test step.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory database");

    for ddl in FIXTURE {
        sqlx::query(ddl).execute(&pool).await.expect("fixture table");
    }
    pool
}

pub async fn create_ops() -> RecordOperations {
    RecordOperations::new(memory_pool().await, Vec::new())
}

pub fn test_config() -> AppConfig {
    AppConfig {
        db_url: "sqlite::memory:".to_string(),
        db_name: "memory".to_string(),
        ignore_tables: Vec::new(),
        format: OutputFormat::Markdown,
    }
}
