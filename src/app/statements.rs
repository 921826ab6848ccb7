use crate::app::error::{AdminError, AdminResult};
use crate::app::models::{ColumnInfo, TableSchema};

// Statements only ever embed names taken from a `TableSchema`, i.e. names the catalog
// reported. Values are always bound through `?` placeholders.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub param_count: usize,
}

pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

// Generated columns are readable but not assignable, so they are not on the list.
pub fn allowed_column<'s>(schema: &'s TableSchema, column_name: &str) -> AdminResult<&'s ColumnInfo> {
    schema
        .column(column_name)
        .filter(|c| !c.is_generated)
        .ok_or_else(|| AdminError::UnknownColumn {
            table: schema.table_name.clone(),
            column: column_name.to_string(),
        })
}

pub fn build_insert(schema: &TableSchema, columns: &[ColumnInfo]) -> Statement {
    let table = quote_identifier(&schema.table_name);
    if columns.is_empty() {
        return Statement {
            sql: format!("INSERT INTO {} DEFAULT VALUES", table),
            param_count: 0,
        };
    }

    let columns_csv = columns
        .iter()
        .map(|c| quote_identifier(&c.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");

    Statement {
        sql: format!("INSERT INTO {} ({}) VALUES ({})", table, columns_csv, placeholders),
        param_count: columns.len(),
    }
}

// value first, then key
pub fn build_update_single_column(
    schema: &TableSchema,
    target: &ColumnInfo,
    primary_key: &ColumnInfo,
) -> String {
    format!(
        "UPDATE {} SET {} = ? WHERE {} = ?",
        quote_identifier(&schema.table_name),
        quote_identifier(&target.name),
        quote_identifier(&primary_key.name)
    )
}

pub fn build_delete(schema: &TableSchema, primary_key: &ColumnInfo) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?",
        quote_identifier(&schema.table_name),
        quote_identifier(&primary_key.name)
    )
}

pub fn build_select_all(schema: &TableSchema) -> String {
    format!("SELECT * FROM {}", quote_identifier(&schema.table_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::analyzer::analyze;

    fn column(name: &str, position: i64, pk: bool) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            ordinal_position: position,
            is_primary_key: pk,
            data_type: "TEXT".to_string(),
            not_null: false,
            is_generated: false,
        }
    }

    fn location() -> TableSchema {
        analyze(
            "Location",
            vec![column("idLocation", 1, true), column("name", 2, false)],
            "CREATE TABLE Location(idLocation INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)",
        )
    }

    #[test]
    fn insert_has_one_placeholder_per_column() {
        let schema = location();
        let stmt = build_insert(&schema, &schema.columns);
        assert_eq!(
            stmt.sql,
            r#"INSERT INTO "Location" ("idLocation", "name") VALUES (?, ?)"#
        );
        assert_eq!(stmt.param_count, 2);

        let stmt = build_insert(&schema, &schema.insertable_columns);
        assert_eq!(stmt.sql, r#"INSERT INTO "Location" ("name") VALUES (?)"#);
        assert_eq!(stmt.param_count, 1);
    }

    #[test]
    fn insert_without_columns_uses_defaults() {
        let schema = location();
        let stmt = build_insert(&schema, &[]);
        assert_eq!(stmt.sql, r#"INSERT INTO "Location" DEFAULT VALUES"#);
        assert_eq!(stmt.param_count, 0);
    }

    #[test]
    fn update_and_delete_key_on_primary_key() {
        let schema = location();
        let pk = schema.primary_key.clone().unwrap();
        let name = allowed_column(&schema, "name").unwrap();
        assert_eq!(
            build_update_single_column(&schema, name, &pk),
            r#"UPDATE "Location" SET "name" = ? WHERE "idLocation" = ?"#
        );
        assert_eq!(
            build_delete(&schema, &pk),
            r#"DELETE FROM "Location" WHERE "idLocation" = ?"#
        );
        assert_eq!(build_select_all(&schema), r#"SELECT * FROM "Location""#);
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let schema = location();
        let err = allowed_column(&schema, "name = 1; DROP TABLE Location; --").unwrap_err();
        assert!(matches!(err, AdminError::UnknownColumn { .. }));
    }

    #[test]
    fn generated_columns_cannot_be_assigned() {
        let mut doubled = column("doubled", 3, false);
        doubled.is_generated = true;
        let schema = analyze(
            "Item",
            vec![column("id", 1, true), column("price", 2, false), doubled],
            "CREATE TABLE Item(id INTEGER PRIMARY KEY, price REAL, doubled REAL AS (price * 2))",
        );
        assert!(allowed_column(&schema, "price").is_ok());
        let err = allowed_column(&schema, "doubled").unwrap_err();
        assert!(matches!(err, AdminError::UnknownColumn { column, .. } if column == "doubled"));
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        assert_eq!(quote_identifier(r#"we"ird"#), r#""we""ird""#);
    }
}
