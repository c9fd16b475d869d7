//! Core types shared across the pipeline and loader.

pub mod identifier;
pub mod schema;
pub mod value;

pub use schema::{Column, ColumnKind, SchemaRegistry, TableSchema};
pub use value::{Batch, CellValue, Row};
