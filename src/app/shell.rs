use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::app::cli::{Command, OutputFormat};
use crate::app::config::AppConfig;
use crate::app::error::AdminError;
use crate::app::formatter::OutputGenerator;
use crate::app::models::CellValue;
use crate::app::records::RecordOperations;

// Terminal front end. Prompts, pickers and printing live here; every database
// decision is delegated to `RecordOperations`.

const MENU: &str = "\n--- Main Menu ---\n[1] Insert a record\n[2] Update a record\n[3] Delete a record\n[4] Show all records of a table\n[5] Exit";

pub struct Shell<'a, R, W> {
    ops: &'a RecordOperations,
    config: &'a AppConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ops: &'a RecordOperations, config: &'a AppConfig, input: R, output: W) -> Self {
        Self {
            ops,
            config,
            input,
            output,
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Tables => self.show_tables().await,
            Command::Schema { table } => self.show_schema(&table).await,
            Command::Insert { table, values } => {
                let values = values.iter().map(|v| CellValue::from_input(v)).collect();
                self.insert(&table, values).await
            }
            Command::Update {
                table,
                column,
                value,
                key,
            } => {
                self.update(
                    &table,
                    &column,
                    CellValue::from_input(&value),
                    CellValue::from_input(&key),
                )
                .await
            }
            Command::Delete { table, key, yes } => {
                if !yes && !self.confirm_delete(&table, &key)? {
                    writeln!(self.output, "Cancelled.")?;
                    return Ok(());
                }
                self.delete(&table, CellValue::from_input(&key)).await
            }
            Command::Query { table } => self.show_rows(&table).await,
            Command::Menu => self.run_menu().await,
        }
    }

    // Failed actions are reported and the menu comes back.
    pub async fn run_menu(&mut self) -> Result<()> {
        writeln!(self.output, "Connected to {}.", self.config.db_name)?;

        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.insert_flow().await,
                "2" => self.update_flow().await,
                "3" => self.delete_flow().await,
                "4" => self.query_flow().await,
                "5" => break,
                _ => {
                    writeln!(self.output, "Invalid option, try again.")?;
                    continue;
                }
            };

            if let Err(err) = outcome {
                self.report(&err)?;
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    async fn show_tables(&mut self) -> Result<()> {
        let tables = self.ops.list_tables().await?;
        let rendered = match self.config.format {
            OutputFormat::Markdown => {
                OutputGenerator::generate_table_list(&self.config.db_name, &tables)?
            }
            OutputFormat::Json => OutputGenerator::generate_json(&tables)?,
        };
        writeln!(self.output, "{}", rendered)?;
        Ok(())
    }

    async fn show_schema(&mut self, table: &str) -> Result<()> {
        let schema = self.ops.get_table_schema(table).await?;
        let rendered = match self.config.format {
            OutputFormat::Markdown => OutputGenerator::generate_schema(&schema)?,
            OutputFormat::Json => OutputGenerator::generate_json(&schema)?,
        };
        writeln!(self.output, "{}", rendered)?;
        Ok(())
    }

    async fn show_rows(&mut self, table: &str) -> Result<()> {
        let result = self.ops.query_all(table).await?;
        let rendered = match self.config.format {
            OutputFormat::Markdown => OutputGenerator::generate_rows(table, &result)?,
            OutputFormat::Json => OutputGenerator::generate_json(&result)?,
        };
        writeln!(self.output, "{}", rendered)?;
        Ok(())
    }

    async fn insert(&mut self, table: &str, values: Vec<CellValue>) -> Result<()> {
        let outcome = self.ops.insert_record(table, values).await?;
        match outcome.generated_key {
            Some(key) => writeln!(self.output, "Record inserted into '{}' (ID: {}).", table, key)?,
            None => writeln!(self.output, "Record inserted into '{}'.", table)?,
        }
        Ok(())
    }

    async fn update(
        &mut self,
        table: &str,
        column: &str,
        value: CellValue,
        key: CellValue,
    ) -> Result<()> {
        let rows = self.ops.update_record(table, column, value, key.clone()).await?;
        if rows == 0 {
            writeln!(self.output, "No record with key {} in '{}'. Nothing updated.", key, table)?;
        } else {
            writeln!(self.output, "Record updated.")?;
        }
        Ok(())
    }

    async fn delete(&mut self, table: &str, key: CellValue) -> Result<()> {
        let rows = self.ops.delete_record(table, key.clone()).await?;
        if rows == 0 {
            writeln!(self.output, "No record with key {} in '{}'. Nothing deleted.", key, table)?;
        } else {
            writeln!(self.output, "Record deleted.")?;
        }
        Ok(())
    }

    async fn insert_flow(&mut self) -> Result<()> {
        let Some(table) = self.choose_table().await? else {
            return Ok(());
        };
        let schema = self.ops.get_table_schema(&table).await?;

        writeln!(self.output, "\n--- New record in '{}' ---", table)?;
        let mut values = Vec::with_capacity(schema.insertable_columns.len());
        for column in &schema.insertable_columns {
            let raw = self.require(&format!("Value for {}: ", column.name))?;
            values.push(CellValue::from_input(&raw));
        }

        self.insert(&table, values).await
    }

    async fn update_flow(&mut self) -> Result<()> {
        let Some(table) = self.choose_table().await? else {
            return Ok(());
        };
        let schema = self.ops.get_table_schema(&table).await?;
        let Some(pk) = schema.primary_key.as_ref() else {
            return Err(AdminError::NoPrimaryKey(table).into());
        };

        let key = self.require(&format!("\n'{}' of the record to update: ", pk.name))?;

        let headers: Vec<String> = schema
            .columns
            .iter()
            .filter(|c| !c.is_generated)
            .map(|c| c.name.clone())
            .collect();
        writeln!(self.output, "\nWhich column do you want to update?")?;
        let Some(index) = self.choose("Choose a column: ", &headers)? else {
            return Ok(());
        };
        let column = &headers[index];
        let value = self.require(&format!("New value for '{}': ", column))?;

        self.update(
            &table,
            column,
            CellValue::from_input(&value),
            CellValue::from_input(&key),
        )
        .await
    }

    async fn delete_flow(&mut self) -> Result<()> {
        let Some(table) = self.choose_table().await? else {
            return Ok(());
        };
        let schema = self.ops.get_table_schema(&table).await?;
        let Some(pk) = schema.primary_key.as_ref() else {
            return Err(AdminError::NoPrimaryKey(table).into());
        };

        let key = self.require(&format!("\n'{}' of the record to DELETE: ", pk.name))?;
        if !self.confirm_delete(&table, &key)? {
            writeln!(self.output, "Cancelled.")?;
            return Ok(());
        }

        self.delete(&table, CellValue::from_input(&key)).await
    }

    async fn query_flow(&mut self) -> Result<()> {
        let Some(table) = self.choose_table().await? else {
            return Ok(());
        };
        self.show_rows(&table).await
    }

    async fn choose_table(&mut self) -> Result<Option<String>> {
        let tables = self.ops.list_tables().await?;
        if tables.is_empty() {
            writeln!(self.output, "No tables found in the database.")?;
            return Ok(None);
        }

        writeln!(self.output, "\n--- Select a table ---")?;
        Ok(self
            .choose("Choose a table (number): ", &tables)?
            .map(|index| tables[index].clone()))
    }

    fn choose(&mut self, label: &str, options: &[String]) -> Result<Option<usize>> {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "[{}] {}", i + 1, option)?;
        }

        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                Ok(_) => writeln!(self.output, "Invalid option.")?,
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    fn confirm_delete(&mut self, table: &str, key: &str) -> Result<bool> {
        let question = format!(
            "WARNING: delete the record with key {} from '{}'? This cannot be undone. (y/n): ",
            key, table
        );
        let answer = self.prompt(&question)?.unwrap_or_default();
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    fn require(&mut self, label: &str) -> Result<String> {
        self.prompt(label)?.context("input ended unexpectedly")
    }

    // None at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn report(&mut self, err: &anyhow::Error) -> Result<()> {
        writeln!(self.output, "\nError: {:#}", err)?;
        if let Some(AdminError::Execution(message)) = err.downcast_ref::<AdminError>() {
            if message.contains("FOREIGN KEY") {
                writeln!(
                    self.output,
                    "Hint: a referenced row does not exist, or another row still points at this one."
                )?;
            }
        }
        Ok(())
    }
}
