use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, TypeInfo, ValueRef};
use tracing::{debug, info, warn};

use crate::app::analyzer;
use crate::app::error::{AdminError, AdminResult};
use crate::app::inspector::Inspector;
use crate::app::models::{CellValue, InsertOutcome, QueryResult, TableSchema};
use crate::app::statements::{self, Statement};

// Schema is re-read from the catalog on every call; each write is its own transaction.
pub struct RecordOperations {
    pool: SqlitePool,
    ignore_tables: Vec<String>,
}

impl RecordOperations {
    pub fn new(pool: SqlitePool, ignore_tables: Vec<String>) -> Self {
        Self {
            pool,
            ignore_tables,
        }
    }

    fn inspector(&self) -> Inspector<'_> {
        Inspector::new(&self.pool, &self.ignore_tables)
    }

    pub async fn list_tables(&self) -> AdminResult<Vec<String>> {
        self.inspector().list_tables().await
    }

    pub async fn get_table_schema(&self, table_name: &str) -> AdminResult<TableSchema> {
        let inspector = self.inspector();
        let tables = inspector.list_tables().await?;
        if !tables.iter().any(|t| t == table_name) {
            return Err(AdminError::TableNotFound(table_name.to_string()));
        }

        let columns = inspector.describe_columns(table_name).await?;
        let create_statement = inspector.get_create_statement(table_name).await?;
        Ok(analyzer::analyze(table_name, columns, &create_statement))
    }

    pub async fn insert_record(
        &self,
        table_name: &str,
        values: Vec<CellValue>,
    ) -> AdminResult<InsertOutcome> {
        let schema = self.get_table_schema(table_name).await?;
        let Statement { sql, param_count } =
            statements::build_insert(&schema, &schema.insertable_columns);

        if values.len() != param_count {
            return Err(AdminError::ParameterCountMismatch {
                expected: param_count,
                actual: values.len(),
            });
        }

        let result = self.execute_write(table_name, &sql, values).await?;
        Ok(InsertOutcome {
            rows_affected: result.rows_affected(),
            generated_key: schema
                .auto_generated_key
                .then_some(result.last_insert_rowid()),
        })
    }

    pub async fn update_record(
        &self,
        table_name: &str,
        target_column: &str,
        new_value: CellValue,
        primary_key_value: CellValue,
    ) -> AdminResult<u64> {
        let schema = self.get_table_schema(table_name).await?;
        let primary_key = schema
            .primary_key
            .as_ref()
            .ok_or_else(|| AdminError::NoPrimaryKey(table_name.to_string()))?;
        let target = statements::allowed_column(&schema, target_column)?;

        let sql = statements::build_update_single_column(&schema, target, primary_key);
        let result = self
            .execute_write(table_name, &sql, vec![new_value, primary_key_value])
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_record(
        &self,
        table_name: &str,
        primary_key_value: CellValue,
    ) -> AdminResult<u64> {
        let schema = self.get_table_schema(table_name).await?;
        let primary_key = schema
            .primary_key
            .as_ref()
            .ok_or_else(|| AdminError::NoPrimaryKey(table_name.to_string()))?;

        let sql = statements::build_delete(&schema, primary_key);
        let result = self
            .execute_write(table_name, &sql, vec![primary_key_value])
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn query_all(&self, table_name: &str) -> AdminResult<QueryResult> {
        let schema = self.get_table_schema(table_name).await?;
        let sql = statements::build_select_all(&schema);
        debug!(sql = %sql, "querying");

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AdminError::execution)?;

        let rows = rows
            .iter()
            .map(decode_row)
            .collect::<AdminResult<Vec<_>>>()?;

        Ok(QueryResult {
            headers: schema.headers(),
            rows,
        })
    }

    async fn execute_write(
        &self,
        table_name: &str,
        sql: &str,
        params: Vec<CellValue>,
    ) -> AdminResult<SqliteQueryResult> {
        debug!(sql = %sql, params = params.len(), "executing");
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AdminError::connection)?;

        let query = params.into_iter().fold(sqlx::query(sql), bind_value);
        match query.execute(&mut *tx).await {
            Ok(result) => {
                tx.commit().await.map_err(AdminError::execution)?;
                info!(
                    table = table_name,
                    rows = result.rows_affected(),
                    "write committed"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(table = table_name, error = %err, "write rolled back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(AdminError::execution(err))
            }
        }
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: CellValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        CellValue::Null => query.bind(None::<String>),
        CellValue::Integer(v) => query.bind(v),
        CellValue::Real(v) => query.bind(v),
        CellValue::Text(v) => query.bind(v),
        CellValue::Blob(v) => query.bind(v),
    }
}

// Decodes by the storage class of each stored value, not the declared column type.
fn decode_row(row: &SqliteRow) -> AdminResult<Vec<CellValue>> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

fn decode_cell(row: &SqliteRow, index: usize) -> AdminResult<CellValue> {
    let storage_class = {
        let raw = row.try_get_raw(index).map_err(AdminError::execution)?;
        if raw.is_null() {
            return Ok(CellValue::Null);
        }
        raw.type_info().name().to_string()
    };

    let value = match storage_class.as_str() {
        "INTEGER" => row.try_get_unchecked::<i64, _>(index).map(CellValue::Integer),
        "REAL" => row.try_get_unchecked::<f64, _>(index).map(CellValue::Real),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(index).map(CellValue::Blob),
        _ => row.try_get_unchecked::<String, _>(index).map(CellValue::Text),
    };
    value.map_err(AdminError::execution)
}
