//! Table/Workbook module for sheetpress
//!
//! Provides a column-oriented in-memory table, an XLSX workbook decoder,
//! and Parquet blob serialization. Tables keep column order, allow any
//! mix of value types per column, and settle on a concrete Arrow type
//! only when they are serialized.
//!
//! # Examples
//!
//! ## Building a table from columns
//!
//! ```
//! use sheetpress_table::{Column, Table};
//!
//! let table = Table::from_columns(vec![
//!     Column::new("host", vec!["esx01", "esx02"]),
//!     Column::new("cores", vec![32i64, 64]),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.column_names(), vec!["host", "cores"]);
//! ```
//!
//! ## Parquet round trip
//!
//! ```
//! use sheetpress_table::{Column, Table};
//!
//! let table = Table::from_columns(vec![Column::new("n", vec![1i64, 2, 3])]).unwrap();
//! let blob = table.to_parquet_bytes().unwrap();
//! let back = Table::from_parquet_bytes(&blob).unwrap();
//!
//! assert_eq!(back.row_count(), 3);
//! ```
//!
//! ## Decoding an XLSX workbook
//!
//! ```no_run
//! use sheetpress_table::Workbook;
//!
//! let bytes = std::fs::read("report.xlsx").unwrap();
//! let workbook = Workbook::from_xlsx_bytes(&bytes).unwrap();
//! for (name, table) in workbook.tables() {
//!     println!("{name}: {} rows", table.row_count());
//! }
//! ```
//!
//! ## Stacking tables with different columns
//!
//! ```
//! use sheetpress_table::{Column, Table};
//!
//! let a = Table::from_columns(vec![Column::new("x", vec![1i64])]).unwrap();
//! let b = Table::from_columns(vec![Column::new("y", vec!["z"])]).unwrap();
//! let merged = Table::concat(&[a, b]);
//!
//! assert_eq!(merged.row_count(), 2);
//! assert_eq!(merged.column_names(), vec!["x", "y"]);
//! ```

mod cell;
mod column;
mod error;
mod parquet;
mod table;
mod workbook;

/// Re-export cell value type.
pub use cell::Value;
/// Re-export column types.
pub use column::{Column, ColumnType};
/// Re-export table error types.
pub use error::{Result, TableError};
/// Re-export the table type.
pub use table::Table;
/// Re-export the workbook decoder.
pub use workbook::Workbook;
