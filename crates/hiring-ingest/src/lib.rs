//! # hiring-ingest
//!
//! CSV bulk-load pipeline and hiring reports over MySQL.
//!
//! This library provides the core functionality behind the upload API:
//!
//! - **Schema registry** for the fixed set of loadable tables
//! - **Row pipeline** converting raw CSV text into typed, batched rows,
//!   dropping invalid rows individually
//! - **Bulk loader** executing batched parameterized INSERTs with a single
//!   commit per request
//! - **Report queries** for the two fixed hiring aggregates
//!
//! ## Example
//!
//! ```rust,no_run
//! use hiring_ingest::{load_batches, process, Config, DbPool, SchemaRegistry};
//!
//! #[tokio::main]
//! async fn main() -> hiring_ingest::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let pool = DbPool::connect(&config.database).await?;
//!
//!     let registry = SchemaRegistry::builtin();
//!     let schema = registry.lookup("departments").expect("builtin table");
//!
//!     let outcome = process("1,HR\n2,IT", schema, config.ingest.batch_size)?;
//!     let mut conn = pool.get_conn("uploading departments").await?;
//!     let inserted = load_batches(&mut conn, schema, &outcome.batches).await?;
//!     println!("Inserted {} rows", inserted);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod reports;

// Re-exports for convenient access
pub use config::{Config, DatabaseConfig, IngestConfig, ServerConfig};
pub use core::schema::{Column, ColumnKind, SchemaRegistry, TableSchema};
pub use core::value::{Batch, CellValue, Row};
pub use db::DbPool;
pub use error::{LoadError, Result};
pub use loader::load_batches;
pub use pipeline::{process, ProcessOutcome};
pub use reports::{departments_above_mean, hired_by_quarter, DepartmentHires, QuarterlyHires};
