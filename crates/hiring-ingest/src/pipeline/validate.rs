//! Per-kind field converters.
//!
//! Pure and deterministic: the pipeline decides what to log and drop, these
//! functions only convert.

use chrono::NaiveDateTime;

use crate::core::schema::ColumnKind;
use crate::core::value::CellValue;

/// The only accepted timestamp input form: UTC Zulu, seconds precision.
const TIMESTAMP_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// How timestamps render when bound to the database.
pub const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a raw field as a signed 64-bit integer.
///
/// Empty, non-numeric, or overflowing input yields `None`.
pub fn convert_integer(raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<i64>().ok()
}

/// Parse a raw field as a `YYYY-MM-DDTHH:MM:SSZ` timestamp.
///
/// No fractional seconds, no offset other than the literal `Z`. Invalid
/// calendar dates and non-numeric components yield `None`.
pub fn convert_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_INPUT_FORMAT).ok()
}

/// Convert one raw field according to its declared column kind.
pub fn convert_field(raw: &str, kind: ColumnKind) -> Option<CellValue> {
    match kind {
        ColumnKind::Integer => convert_integer(raw).map(CellValue::Int),
        ColumnKind::Timestamp => convert_timestamp(raw).map(CellValue::DateTime),
        ColumnKind::Text => Some(CellValue::Text(raw.to_string())),
    }
}
