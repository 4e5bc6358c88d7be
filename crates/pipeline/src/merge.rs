//! Merge: many Parquet blobs in, one Parquet blob out.

use crate::error::{PipelineError, Result};
use crate::normalize::apply_merge_rules;
use crate::rules::Rules;
use base64::{engine::general_purpose, Engine as _};
use sheetpress_table::Table;
use tracing::{debug, warn};

/// Report entry for a merge input that contributed no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSkip {
    /// Zero-based position of the input in the request.
    pub index: usize,
    pub reason: String,
}

/// Result of one merge call.
#[derive(Debug)]
pub enum MergeOutcome {
    /// At least one input survived; `content` holds the merged blob.
    Merged {
        content: String,
        skipped: Vec<InputSkip>,
    },
    /// No input survived. A distinguishable success, not an error.
    Empty { skipped: Vec<InputSkip> },
}

/// Merge base64-encoded Parquet blobs into a single blob.
///
/// Inputs that fail to decode, fail to parse as Parquet, or hold an
/// empty table are skipped and reported; one bad input never fails the
/// call. Surviving tables are concatenated in input order with their
/// columns unioned by name (rows from a table lacking a column get
/// null there), the merge normalization pass runs over the result, and
/// the merged table is serialized. Only that final serialization is a
/// hard failure, since no safe partial result exists past
/// concatenation.
pub fn merge_all(contents: &[String], rules: &Rules) -> Result<MergeOutcome> {
    let mut tables = Vec::new();
    let mut skipped = Vec::new();

    for (index, encoded) in contents.iter().enumerate() {
        let bytes = match general_purpose::STANDARD.decode(encoded) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(index, error = %err, "merge input skipped: invalid base64");
                skipped.push(InputSkip {
                    index,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        let table = match Table::from_parquet_bytes(&bytes) {
            Ok(table) => table,
            Err(err) => {
                warn!(index, error = %err, "merge input skipped: unreadable blob");
                skipped.push(InputSkip {
                    index,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        if table.is_empty_table() {
            debug!(index, "merge input skipped: empty table");
            skipped.push(InputSkip {
                index,
                reason: "empty table".to_string(),
            });
            continue;
        }
        tables.push(table);
    }

    if tables.is_empty() {
        debug!(inputs = contents.len(), "nothing to merge");
        return Ok(MergeOutcome::Empty { skipped });
    }

    let mut merged = Table::concat(&tables);
    apply_merge_rules(&mut merged, &rules.merge_text_columns);

    let blob = merged
        .to_parquet_bytes()
        .map_err(PipelineError::MergeSerialization)?;
    debug!(
        inputs = contents.len(),
        merged_rows = merged.row_count(),
        skipped = skipped.len(),
        "merge complete"
    );
    Ok(MergeOutcome::Merged {
        content: general_purpose::STANDARD.encode(blob),
        skipped,
    })
}
