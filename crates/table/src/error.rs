use thiserror::Error;

/// Errors that can occur while decoding, building, or serializing tables
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    DuplicateSheet { name: String },

    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Duplicate column name: {name}")]
    DuplicateColumn { name: String },

    #[error("Column '{name}' has {actual} values, table has {expected} rows")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Table is empty, nothing to serialize")]
    EmptyTable,

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Corrupt blob: {0}")]
    CorruptBlob(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
