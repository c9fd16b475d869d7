//! Table schemas and the fixed registry of loadable tables.
//!
//! The registry doubles as the identifier allow-list: only table and column
//! names it contains ever reach SQL generation. Schemas are built once at
//! process start and never mutated.

use std::collections::HashMap;
use std::fmt;

/// Type tag for a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Signed 64-bit integer.
    Integer,
    /// UTC timestamp in `YYYY-MM-DDTHH:MM:SSZ` input form.
    Timestamp,
    /// Free text, no conversion.
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Integer => write!(f, "integer"),
            ColumnKind::Timestamp => write!(f, "timestamp"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

/// A single declared column.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name as it appears in the target table.
    pub name: String,

    /// Converter the column's raw values must satisfy.
    pub kind: ColumnKind,
}

impl Column {
    /// Create a column definition.
    pub fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// Ordered column list for one target table.
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Table name.
    pub name: String,

    /// Column definitions in declared (and CSV positional) order.
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Create a table schema.
    pub fn new(name: &str, columns: Vec<Column>) -> Self {
        Self {
            name: name.to_string(),
            columns,
        }
    }
}

/// Fixed mapping from table name to its schema.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tables: HashMap<String, TableSchema>,
}

impl SchemaRegistry {
    /// The registry of tables this service loads: departments, jobs, and
    /// employees.
    pub fn builtin() -> Self {
        use ColumnKind::{Integer, Text, Timestamp};

        let tables = [
            TableSchema::new(
                "departments",
                vec![Column::new("id", Integer), Column::new("department", Text)],
            ),
            TableSchema::new(
                "jobs",
                vec![Column::new("id", Integer), Column::new("job", Text)],
            ),
            TableSchema::new(
                "employees",
                vec![
                    Column::new("id", Integer),
                    Column::new("name", Text),
                    Column::new("hire_datetime", Timestamp),
                    Column::new("department_id", Integer),
                    Column::new("job_id", Integer),
                ],
            ),
        ];

        Self {
            tables: tables
                .into_iter()
                .map(|schema| (schema.name.clone(), schema))
                .collect(),
        }
    }

    /// Look up a table schema by name. A miss is a client error, never a
    /// server fault.
    pub fn lookup(&self, table_name: &str) -> Option<&TableSchema> {
        self.tables.get(table_name)
    }

    /// Names of all registered tables, sorted.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
