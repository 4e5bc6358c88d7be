//! Conversion and merge pipeline for sheetpress
//!
//! Orchestrates the table crate into the two operations the service
//! exposes: converting one uploaded XLSX workbook into per-sheet
//! Parquet blobs, and merging many blobs back into a single table.
//! Per-item failures (a sheet that will not serialize, a corrupt merge
//! input) are collected into skip reports instead of failing the call.
//!
//! # Example
//!
//! ```
//! use base64::{engine::general_purpose, Engine as _};
//! use sheetpress_pipeline::{merge_all, MergeOutcome, Rules};
//! use sheetpress_table::{Column, Table};
//!
//! let table = Table::from_columns(vec![Column::new("host", vec!["esx01"])]).unwrap();
//! let blob = general_purpose::STANDARD.encode(table.to_parquet_bytes().unwrap());
//!
//! let outcome = merge_all(&[blob.clone(), blob], &Rules::default()).unwrap();
//! assert!(matches!(outcome, MergeOutcome::Merged { .. }));
//! ```

mod error;
mod merge;
mod normalize;
mod rules;
mod upload;

/// Re-export pipeline error types.
pub use error::{PipelineError, Result};
/// Re-export the merge operation and its outcome types.
pub use merge::{merge_all, InputSkip, MergeOutcome};
/// Re-export the normalization passes and skip report types.
pub use normalize::{apply_merge_rules, apply_upload_rules, force_text, RuleSkip, RuleSkipReason};
/// Re-export the rule configuration.
pub use rules::{Rules, SheetColumnRule};
/// Re-export the upload conversion and its outcome types.
pub use upload::{
    process_upload, Page, SheetSkip, SheetSkipReason, UploadOutcome, SOURCE_FILENAME_COLUMN,
};
