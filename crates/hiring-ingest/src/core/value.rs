//! Typed cell values for schema-validated rows.
//!
//! A row only ever reaches the loader once every declared column converted
//! successfully, so a `Row` is always aligned to its schema's column order.

use chrono::NaiveDateTime;

/// A single typed field value, tagged by the column kind it satisfied.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Signed integer column value.
    Int(i64),

    /// Timestamp column value. Stored without timezone; binds to MySQL as
    /// `YYYY-MM-DD HH:MM:SS`.
    DateTime(NaiveDateTime),

    /// Text column value, passed through unchanged.
    Text(String),
}

/// One fully validated row, fields aligned to the schema's column order.
pub type Row = Vec<CellValue>;

/// A bounded group of validated rows submitted as one INSERT statement.
///
/// Invariant: every row conforms to the same table schema, and batch order
/// preserves the original input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Batch {
    /// Rows in this batch.
    pub rows: Vec<Row>,
}

impl Batch {
    /// Create a batch from validated rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows in this batch.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the batch holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
