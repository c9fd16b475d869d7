//! CSV text to validated, batched rows.
//!
//! Every input line is data; there is no header handling. A leading header
//! line simply fails type validation on its first non-text column and is
//! dropped like any other bad row.

pub mod validate;

pub use validate::{convert_field, convert_integer, convert_timestamp};

use tracing::{debug, warn};

use crate::core::schema::TableSchema;
use crate::core::value::{Batch, Row};
use crate::error::{LoadError, Result};

/// Outcome of processing one CSV payload against a schema.
#[derive(Debug)]
pub struct ProcessOutcome {
    /// Validated rows chunked into insert-sized batches, input order
    /// preserved within and across batches.
    pub batches: Vec<Batch>,

    /// Rows that survived validation.
    pub accepted: usize,

    /// Rows dropped for a failed field conversion.
    pub dropped: usize,
}

/// Parse CSV text, validate each record against the schema, and chunk the
/// survivors into batches of at most `batch_size` rows.
///
/// A record either converts on every declared column or is dropped whole;
/// drops are logged and counted, never fatal. Zero surviving rows (including
/// empty input) is `LoadError::NoValidRows`, distinct from schema lookup and
/// I/O failures.
pub fn process(csv_text: &str, schema: &TableSchema, batch_size: usize) -> Result<ProcessOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut rows: Vec<Row> = Vec::new();
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record?;
        match convert_record(&record, schema) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    if rows.is_empty() {
        return Err(LoadError::NoValidRows);
    }

    let accepted = rows.len();
    let batches = into_batches(rows, batch_size);

    debug!(
        "Validated {} rows for '{}' ({} dropped), {} batch(es)",
        accepted,
        schema.name,
        dropped,
        batches.len()
    );

    Ok(ProcessOutcome {
        batches,
        accepted,
        dropped,
    })
}

/// Convert one CSV record against the schema's columns in declared order.
///
/// Missing trailing fields read as empty strings; extra trailing fields are
/// ignored. The first failed conversion drops the whole record.
fn convert_record(record: &csv::StringRecord, schema: &TableSchema) -> Option<Row> {
    let mut row = Row::with_capacity(schema.columns.len());

    for (position, column) in schema.columns.iter().enumerate() {
        let raw = record.get(position).unwrap_or("");
        match convert_field(raw, column.kind) {
            Some(value) => row.push(value),
            None => {
                warn!(
                    "Invalid {} value '{}' for column '{}'. Row skipped.",
                    column.kind, raw, column.name
                );
                return None;
            }
        }
    }

    Some(row)
}

/// Chunk rows into consecutive batches of at most `batch_size`.
fn into_batches(rows: Vec<Row>, batch_size: usize) -> Vec<Batch> {
    let mut batches = Vec::with_capacity(rows.len().div_ceil(batch_size.max(1)));
    let mut current = Vec::new();

    for row in rows {
        current.push(row);
        if current.len() >= batch_size {
            batches.push(Batch::new(std::mem::take(&mut current)));
        }
    }
    if !current.is_empty() {
        batches.push(Batch::new(current));
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::SchemaRegistry;
    use crate::core::value::CellValue;

    fn departments() -> TableSchema {
        SchemaRegistry::builtin().lookup("departments").unwrap().clone()
    }

    fn employees() -> TableSchema {
        SchemaRegistry::builtin().lookup("employees").unwrap().clone()
    }

    // =========================================================================
    // Validation and drop behavior
    // =========================================================================

    #[test]
    fn test_header_line_is_dropped_by_validation() {
        let outcome = process("id,department\n1,HR\n2,IT", &departments(), 1000).unwrap();
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.dropped, 1);
        assert_eq!(outcome.batches.len(), 1);
        assert_eq!(
            outcome.batches[0].rows[0],
            vec![CellValue::Int(1), CellValue::Text("HR".into())]
        );
        assert_eq!(
            outcome.batches[0].rows[1],
            vec![CellValue::Int(2), CellValue::Text("IT".into())]
        );
    }

    #[test]
    fn test_invalid_integer_drops_only_that_row() {
        let outcome = process("1,HR\nX,IT\n3,Sales", &departments(), 1000).unwrap();
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.dropped, 1);
        let rows = &outcome.batches[0].rows;
        assert_eq!(rows[0][0], CellValue::Int(1));
        assert_eq!(rows[1][0], CellValue::Int(3));
    }

    #[test]
    fn test_invalid_timestamp_drops_employee_row() {
        let csv = "1,Alice,2021-05-03T10:15:30Z,1,2\n2,Bob,yesterday,1,2";
        let outcome = process(csv, &employees(), 1000).unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.dropped, 1);
        assert_eq!(outcome.batches[0].rows[0][1], CellValue::Text("Alice".into()));
    }

    #[test]
    fn test_quoted_field_with_embedded_delimiter() {
        let outcome = process("1,\"HR, People Ops\"", &departments(), 1000).unwrap();
        assert_eq!(
            outcome.batches[0].rows[0][1],
            CellValue::Text("HR, People Ops".into())
        );
    }

    #[test]
    fn test_short_row_pads_with_empty_string() {
        // A lone integer: the missing text column reads as "" which is a
        // valid text value.
        let outcome = process("7", &departments(), 1000).unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(
            outcome.batches[0].rows[0],
            vec![CellValue::Int(7), CellValue::Text(String::new())]
        );
    }

    #[test]
    fn test_short_employee_row_is_dropped() {
        // Missing timestamp and FK columns read as "" which fails their
        // converters.
        let outcome = process("1,Alice\n2,Bob,2021-05-03T10:15:30Z,1,2", &employees(), 1000).unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let outcome = process("1,HR,unused,also-unused", &departments(), 1000).unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.batches[0].rows[0].len(), 2);
    }

    // =========================================================================
    // No-valid-data signaling
    // =========================================================================

    #[test]
    fn test_empty_input_is_no_valid_rows() {
        assert!(matches!(
            process("", &departments(), 1000),
            Err(LoadError::NoValidRows)
        ));
    }

    #[test]
    fn test_all_invalid_input_is_no_valid_rows() {
        assert!(matches!(
            process("id,department\na,b", &departments(), 1000),
            Err(LoadError::NoValidRows)
        ));
    }

    // =========================================================================
    // Batching
    // =========================================================================

    #[test]
    fn test_batch_count_is_ceil_of_rows_over_cap() {
        let csv: String = (0..25).map(|i| format!("{},dept{}\n", i, i)).collect();
        let outcome = process(&csv, &departments(), 10).unwrap();
        assert_eq!(outcome.accepted, 25);
        let sizes: Vec<usize> = outcome.batches.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
    }

    #[test]
    fn test_batches_preserve_input_order() {
        let csv: String = (0..25).map(|i| format!("{},dept{}\n", i, i)).collect();
        let outcome = process(&csv, &departments(), 10).unwrap();
        let ids: Vec<i64> = outcome
            .batches
            .iter()
            .flat_map(|b| b.rows.iter())
            .map(|row| match row[0] {
                CellValue::Int(n) => n,
                _ => panic!("expected integer id"),
            })
            .collect();
        let expected: Vec<i64> = (0..25).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_exact_multiple_of_cap_has_no_empty_tail_batch() {
        let csv: String = (0..20).map(|i| format!("{},dept{}\n", i, i)).collect();
        let outcome = process(&csv, &departments(), 10).unwrap();
        assert_eq!(outcome.batches.len(), 2);
        assert!(outcome.batches.iter().all(|b| b.len() == 10));
    }
}
