use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional database connection string (e.g. sqlite://data.db). If not provided, looks for DB_URL env var.
    #[arg(short, long)]
    pub db_url: Option<String>,

    /// Tables to hide from listings and operations. May be repeated.
    #[arg(short, long)]
    pub ignore: Option<Vec<String>>,

    /// Output format for listings and query results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Action to run; the interactive menu starts when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List user tables
    Tables,
    /// Show the columns, key and insertable columns of a table
    Schema { table: String },
    /// Insert a row; values follow the table's insertable columns in order
    Insert {
        table: String,
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Set one column of the row with the given key
    Update {
        table: String,
        column: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Primary key value of the row to change
        #[arg(short, long)]
        key: String,
    },
    /// Delete the row with the given key
    Delete {
        table: String,
        /// Primary key value of the row to delete
        #[arg(short, long)]
        key: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print every row of a table
    Query { table: String },
    /// Interactive numbered menu
    Menu,
}
