use thiserror::Error;

pub type AdminResult<T> = Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("could not open database: {0}")]
    Connection(String),

    #[error("catalog query failed: {0}")]
    Catalog(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("table {table} has no column named {column}")]
    UnknownColumn { table: String, column: String },

    #[error("table {0} has no primary key")]
    NoPrimaryKey(String),

    #[error("expected {expected} values, got {actual}")]
    ParameterCountMismatch { expected: usize, actual: usize },

    #[error("statement failed: {0}")]
    Execution(String),
}

impl AdminError {
    pub(crate) fn connection(err: sqlx::Error) -> Self {
        AdminError::Connection(err.to_string())
    }

    pub(crate) fn catalog(err: sqlx::Error) -> Self {
        AdminError::Catalog(err.to_string())
    }

    // The engine's own message is kept as-is so the shell can show it.
    pub(crate) fn execution(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => AdminError::Execution(db.message().to_string()),
            other => AdminError::Execution(other.to_string()),
        }
    }
}
