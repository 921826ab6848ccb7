use crate::app::error::{AdminError, AdminResult};
use crate::app::models::ColumnInfo;
use sqlx::SqlitePool;
use tracing::debug;

// Read-only access to the SQLite catalog (`sqlite_master` and `pragma_table_xinfo`).

pub struct Inspector<'a> {
    pool: &'a SqlitePool,
    ignore_tables: &'a [String],
}

impl<'a> Inspector<'a> {
    pub fn new(pool: &'a SqlitePool, ignore_tables: &'a [String]) -> Self {
        Self {
            pool,
            ignore_tables,
        }
    }

    pub async fn list_tables(&self) -> AdminResult<Vec<String>> {
        debug!("listing tables");
        let tables: Vec<(String,)> = sqlx::query_as(
            r"SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\'",
        )
        .fetch_all(self.pool)
        .await
        .map_err(AdminError::catalog)?;

        Ok(tables
            .into_iter()
            .map(|(name,)| name)
            .filter(|name| !self.ignore_tables.contains(name))
            .collect())
    }

    pub async fn describe_columns(&self, table_name: &str) -> AdminResult<Vec<ColumnInfo>> {
        debug!(table = table_name, "describing columns");
        let columns = sqlx::query_as::<_, ColumnInfo>(
            r#"
            SELECT name,
                   cid + 1 AS ordinal_position,
                   pk > 0 AS is_primary_key,
                   type AS data_type,
                   "notnull" AS not_null,
                   hidden IN (2, 3) AS is_generated
            FROM pragma_table_xinfo(?1)
            WHERE hidden <> 1
            ORDER BY cid
            "#,
        )
        .bind(table_name)
        .fetch_all(self.pool)
        .await
        .map_err(AdminError::catalog)?;

        if columns.is_empty() {
            return Err(AdminError::Catalog(format!(
                "table {} does not exist",
                table_name
            )));
        }
        Ok(columns)
    }

    pub async fn get_create_statement(&self, table_name: &str) -> AdminResult<String> {
        debug!(table = table_name, "reading creation DDL");
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(table_name)
                .fetch_optional(self.pool)
                .await
                .map_err(AdminError::catalog)?;

        match row {
            Some((Some(sql),)) => Ok(sql),
            _ => Err(AdminError::Catalog(format!(
                "no creation statement recorded for {}",
                table_name
            ))),
        }
    }
}
