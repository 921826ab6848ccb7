use crate::app::cli::{Cli, OutputFormat};
use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_url: String,
    pub db_name: String,
    pub ignore_tables: Vec<String>,
    pub format: OutputFormat,
}

pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    build_config(cli, env::var("DB_URL").ok())
}

fn build_config(cli: &Cli, env_db_url: Option<String>) -> Result<AppConfig> {
    let db_url = cli
        .db_url
        .clone()
        .or(env_db_url)
        .context("DB_URL must be set via --db-url or in .env/environment variables")?;

    let db_name = db_name_from_url(&db_url);
    let ignore_tables = cli.ignore.clone().unwrap_or_default();

    Ok(AppConfig {
        db_url,
        db_name,
        ignore_tables,
        format: cli.format,
    })
}

fn db_name_from_url(db_url: &str) -> String {
    let path = db_url.split('?').next().unwrap_or(db_url);
    match path.rsplit(['/', ':']).next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flag_wins_over_environment() {
        let cli = Cli::parse_from(["tablero", "--db-url", "sqlite://flag.db", "tables"]);
        let config = build_config(&cli, Some("sqlite://env.db".into())).unwrap();
        assert_eq!(config.db_url, "sqlite://flag.db");
        assert_eq!(config.db_name, "flag.db");
    }

    #[test]
    fn environment_is_the_fallback() {
        let cli = Cli::parse_from(["tablero", "-i", "audit", "-i", "tmp"]);
        let config = build_config(&cli, Some("sqlite://data/shop.db?mode=rw".into())).unwrap();
        assert_eq!(config.db_name, "shop.db");
        assert_eq!(config.ignore_tables, vec!["audit", "tmp"]);
        assert_eq!(config.format, OutputFormat::Markdown);
    }

    #[test]
    fn missing_url_is_an_error() {
        let cli = Cli::parse_from(["tablero"]);
        assert!(build_config(&cli, None).is_err());
    }

    #[test]
    fn memory_url_has_a_name() {
        assert_eq!(db_name_from_url("sqlite::memory:"), "Unknown");
        assert_eq!(db_name_from_url("sqlite:garage.db"), "garage.db");
    }
}
