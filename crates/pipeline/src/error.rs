use sheetpress_table::TableError;
use thiserror::Error;

/// Errors that can occur in the conversion and merge pipelines
///
/// Per-item failures (one sheet, one merge input) are not errors here;
/// they are collected into skip reports by the operations themselves.
/// Only failures that leave no well-defined output surface as variants.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Workbook decode failed: {0}")]
    Decode(#[from] TableError),

    #[error("Merged table could not be serialized: {0}")]
    MergeSerialization(TableError),

    #[error("Rules file could not be read: {0}")]
    RulesIo(#[from] std::io::Error),

    #[error("Rules file could not be parsed: {0}")]
    RulesParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
