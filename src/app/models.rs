use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

// One column as reported by `pragma_table_xinfo`, in physical order.
#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    // 1-based
    pub ordinal_position: i64,
    pub is_primary_key: bool,
    pub data_type: String,
    pub not_null: bool,
    // GENERATED ALWAYS columns: readable, never written.
    pub is_generated: bool,
}

// Built fresh for every operation, never cached: the schema may change between calls.
#[derive(Serialize, Debug, Clone)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnInfo>,
    pub primary_key: Option<ColumnInfo>,
    pub auto_generated_key: bool,
    pub insertable_columns: Vec<ColumnInfo>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    // Shell input is text except the bare `NULL`; column affinity converts numbers.
    pub fn from_input(raw: &str) -> Self {
        if raw == "NULL" {
            CellValue::Null
        } else {
            CellValue::Text(raw.to_string())
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Real(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Real(v) => write!(f, "{}", v),
            CellValue::Text(v) => write!(f, "{}", v),
            CellValue::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub rows_affected: u64,
    // only set for auto-generated keys
    pub generated_key: Option<i64>,
}
