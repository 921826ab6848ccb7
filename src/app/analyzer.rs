use crate::app::models::{ColumnInfo, TableSchema};

const AUTOINCREMENT_MARKER: &str = "AUTOINCREMENT";

// Composite keys are not modeled: only the first flagged column counts.
pub fn find_primary_key(columns: &[ColumnInfo]) -> Option<&ColumnInfo> {
    columns.iter().find(|c| c.is_primary_key)
}

// Plain text search over the DDL; the marker in a comment or another column's
// definition also counts. SQLite has no catalog flag for AUTOINCREMENT.
pub fn is_auto_generated(create_statement: &str, _primary_key_column: &str) -> bool {
    create_statement
        .to_uppercase()
        .contains(AUTOINCREMENT_MARKER)
}

pub fn insertable_columns(columns: &[ColumnInfo], create_statement: &str) -> Vec<ColumnInfo> {
    let skipped = find_primary_key(columns)
        .filter(|pk| is_auto_generated(create_statement, &pk.name))
        .map(|pk| pk.name.as_str());

    columns
        .iter()
        .filter(|c| !c.is_generated && Some(c.name.as_str()) != skipped)
        .cloned()
        .collect()
}

pub fn analyze(table_name: &str, columns: Vec<ColumnInfo>, create_statement: &str) -> TableSchema {
    let primary_key = find_primary_key(&columns).cloned();
    let auto_generated_key = primary_key
        .as_ref()
        .is_some_and(|pk| is_auto_generated(create_statement, &pk.name));
    let insertable_columns = insertable_columns(&columns, create_statement);

    TableSchema {
        table_name: table_name.to_string(),
        columns,
        primary_key,
        auto_generated_key,
        insertable_columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, position: i64, pk: bool) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            ordinal_position: position,
            is_primary_key: pk,
            data_type: String::new(),
            not_null: false,
            is_generated: false,
        }
    }

    fn names(columns: &[ColumnInfo]) -> Vec<&str> {
        columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn first_flagged_column_is_the_key() {
        let columns = vec![
            column("a", 1, false),
            column("b", 2, true),
            column("c", 3, true),
        ];
        assert_eq!(find_primary_key(&columns).map(|c| c.name.as_str()), Some("b"));
        assert!(find_primary_key(&columns[..1]).is_none());
    }

    #[test]
    fn autoincrement_key_is_not_insertable() {
        let ddl = "CREATE TABLE Location(idLocation integer primary key autoincrement, name TEXT)";
        let columns = vec![column("idLocation", 1, true), column("name", 2, false)];
        assert_eq!(names(&insertable_columns(&columns, ddl)), vec!["name"]);
    }

    #[test]
    fn supplied_key_stays_insertable() {
        let ddl = "CREATE TABLE Machine(idMachine INTEGER PRIMARY KEY, model TEXT)";
        let columns = vec![column("idMachine", 1, true), column("model", 2, false)];
        assert_eq!(names(&insertable_columns(&columns, ddl)), vec!["idMachine", "model"]);
    }

    #[test]
    fn marker_outside_the_key_still_matches() {
        let ddl = "CREATE TABLE Note(id INTEGER PRIMARY KEY, body TEXT DEFAULT 'autoincrement')";
        assert!(is_auto_generated(ddl, "id"));
        let columns = vec![column("id", 1, true), column("body", 2, false)];
        assert_eq!(names(&insertable_columns(&columns, ddl)), vec!["body"]);
    }

    #[test]
    fn generated_columns_are_never_insertable() {
        let ddl = "CREATE TABLE Item(id INTEGER PRIMARY KEY, price REAL, doubled REAL GENERATED ALWAYS AS (price * 2))";
        let mut doubled = column("doubled", 3, false);
        doubled.is_generated = true;
        let columns = vec![column("id", 1, true), column("price", 2, false), doubled];
        let schema = analyze("Item", columns, ddl);
        assert_eq!(names(&schema.insertable_columns), vec!["id", "price"]);
        assert_eq!(schema.headers(), vec!["id", "price", "doubled"]);
    }

    #[test]
    fn keyless_table_keeps_every_column() {
        let ddl = "CREATE TABLE Log(message TEXT, level TEXT) -- AUTOINCREMENT";
        let columns = vec![column("message", 1, false), column("level", 2, false)];
        let schema = analyze("Log", columns, ddl);
        assert!(schema.primary_key.is_none());
        assert!(!schema.auto_generated_key);
        assert_eq!(names(&schema.insertable_columns), vec!["message", "level"]);
    }
}
