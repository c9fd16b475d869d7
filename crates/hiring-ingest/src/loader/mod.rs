//! Batched INSERT execution against MySQL.
//!
//! Builds one multi-row parameterized INSERT per batch and runs every batch
//! of a request inside a single transaction with one commit at the end. Any
//! execution failure aborts the whole operation; dropping the un-committed
//! transaction rolls back, so no partial batch is ever observable.

use mysql_async::prelude::*;
use mysql_async::{Conn, TxOpts};
use tracing::debug;

use crate::core::identifier::quote_mysql;
use crate::core::schema::TableSchema;
use crate::core::value::{Batch, CellValue};
use crate::error::Result;

/// MySQL's hard limit on placeholders in a single prepared statement.
const MYSQL_MAX_PLACEHOLDERS: usize = 65535;

/// Execute all batches against an already-open connection.
///
/// Identifiers come from the schema registry allow-list and are still
/// validated and backtick-quoted before interpolation; values are always
/// bound as `?` parameters. Returns the total row count on success. The
/// caller owns the connection's lifecycle.
pub async fn load_batches(
    conn: &mut Conn,
    schema: &TableSchema,
    batches: &[Batch],
) -> Result<u64> {
    let num_cols = schema.columns.len();
    if num_cols == 0 {
        return Ok(0);
    }
    // Statements stay under the placeholder cap even if a batch is larger.
    let max_rows_per_stmt = MYSQL_MAX_PLACEHOLDERS / num_cols;

    let mut total = 0u64;
    let mut tx = conn.start_transaction(TxOpts::default()).await?;

    for batch in batches {
        for chunk in batch.rows.chunks(max_rows_per_stmt) {
            let sql = build_insert_sql(schema, chunk.len())?;
            let params: Vec<mysql_async::Value> = chunk
                .iter()
                .flat_map(|row| row.iter().map(cell_to_mysql))
                .collect();

            tx.exec_drop(&sql, params).await?;
            total += chunk.len() as u64;
        }
        debug!("Wrote batch of {} rows to {}", batch.len(), schema.name);
    }

    tx.commit().await?;
    Ok(total)
}

/// Build the multi-row INSERT statement for `row_count` rows.
fn build_insert_sql(schema: &TableSchema, row_count: usize) -> Result<String> {
    let table = quote_mysql(&schema.name)?;
    let col_list = schema
        .columns
        .iter()
        .map(|c| quote_mysql(&c.name))
        .collect::<Result<Vec<_>>>()?
        .join(", ");

    let placeholders_per_row = format!("({})", vec!["?"; schema.columns.len()].join(", "));
    let all_placeholders: Vec<String> =
        std::iter::repeat_n(placeholders_per_row, row_count).collect();

    Ok(format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        col_list,
        all_placeholders.join(", ")
    ))
}

fn cell_to_mysql(value: &CellValue) -> mysql_async::Value {
    match value {
        CellValue::Int(i) => mysql_async::Value::from(*i),
        CellValue::DateTime(dt) => mysql_async::Value::from(*dt),
        CellValue::Text(s) => mysql_async::Value::from(s.as_str()),
    }
}
