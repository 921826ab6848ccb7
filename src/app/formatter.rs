use crate::app::models::{QueryResult, TableSchema};
use serde::Serialize;
use std::fmt::Write;

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_table_list(db_name: &str, tables: &[String]) -> Result<String, std::fmt::Error> {
        let mut output = String::new();

        writeln!(output, "Tables in: {}\n", db_name)?;
        if tables.is_empty() {
            writeln!(output, "(no tables)")?;
        }
        for (i, table) in tables.iter().enumerate() {
            writeln!(output, "[{}] {}", i + 1, table)?;
        }

        Ok(output)
    }

    pub fn generate_schema(schema: &TableSchema) -> Result<String, std::fmt::Error> {
        let mut output = String::new();

        writeln!(output, "## Table: {}", schema.table_name)?;

        writeln!(output, "| # | Column | Type | Nullable |")?;
        writeln!(output, "|---|---|---|---|")?;
        for col in &schema.columns {
            writeln!(
                output,
                "| {} | {} | {} | {} |",
                col.ordinal_position,
                escape_cell(&col.name),
                escape_cell(&col.data_type),
                if col.not_null { "NO" } else { "YES" }
            )?;
        }

        match &schema.primary_key {
            Some(pk) if schema.auto_generated_key => {
                writeln!(output, "\n**Primary Key:** {} (auto-generated)", pk.name)?
            }
            Some(pk) => writeln!(output, "\n**Primary Key:** {}", pk.name)?,
            None => writeln!(output, "\n**Primary Key:** none (update and delete disabled)")?,
        }

        let insertable: Vec<&str> = schema
            .insertable_columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        writeln!(output, "\n**Insert Columns:** {}", insertable.join(", "))?;

        Ok(output)
    }

    pub fn generate_rows(table_name: &str, result: &QueryResult) -> Result<String, std::fmt::Error> {
        let mut output = String::new();

        writeln!(
            output,
            "## {} ({} rows)\n",
            table_name,
            result.rows.len()
        )?;

        let headers: Vec<String> = result.headers.iter().map(|h| escape_cell(h)).collect();
        writeln!(output, "| {} |", headers.join(" | "))?;
        writeln!(output, "|{}", "---|".repeat(headers.len()))?;

        for row in &result.rows {
            let cells: Vec<String> = row.iter().map(|v| escape_cell(&v.to_string())).collect();
            writeln!(output, "| {} |", cells.join(" | "))?;
        }

        if result.rows.is_empty() {
            writeln!(output, "\n(empty table)")?;
        }

        Ok(output)
    }

    pub fn generate_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
        serde_json::to_string_pretty(value)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
