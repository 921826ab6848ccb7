pub mod app;

// Re-export useful types for library users
pub use app::config::AppConfig;
pub use app::connect;
pub use app::error::{AdminError, AdminResult};
pub use app::formatter::OutputGenerator;
pub use app::inspector::Inspector;
pub use app::models::{CellValue, ColumnInfo, InsertOutcome, QueryResult, TableSchema};
pub use app::records::RecordOperations;
pub use app::shell::Shell;
