//! Upload conversion: one XLSX payload in, one Parquet blob per sheet out.

use crate::error::Result;
use crate::normalize::{apply_upload_rules, RuleSkip};
use crate::rules::Rules;
use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;
use sheetpress_table::{Column, Value, Workbook};
use tracing::{debug, warn};

/// Name of the provenance column prepended to every converted sheet.
pub const SOURCE_FILENAME_COLUMN: &str = "sourceFilename";

/// One converted sheet: its name and its base64-encoded Parquet blob.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub page_name: String,
    pub content: String,
}

/// Why a sheet produced no page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSkipReason {
    /// The sheet had no data rows.
    Empty,
    /// The sheet could not be turned into a blob.
    Failed(String),
}

/// Report entry for a sheet that produced no page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSkip {
    pub sheet: String,
    pub reason: SheetSkipReason,
}

/// Everything one upload conversion produced.
#[derive(Debug)]
pub struct UploadOutcome {
    /// Surviving sheets, in workbook order.
    pub pages: Vec<Page>,
    /// Sheets that produced no page.
    pub skipped: Vec<SheetSkip>,
    /// Normalization rules that did not match this workbook.
    pub rule_skips: Vec<RuleSkip>,
}

/// Convert one uploaded workbook into per-sheet Parquet blobs.
///
/// Decodes the base64 payload, parses the workbook, applies the
/// upload normalization rules, prepends the `sourceFilename` column to
/// every sheet, and serializes each non-empty sheet. Failures scoped
/// to a single sheet or rule are logged and reported in the outcome;
/// only an undecodable payload fails the whole call.
pub fn process_upload(filename: &str, content: &str, rules: &Rules) -> Result<UploadOutcome> {
    let bytes = general_purpose::STANDARD.decode(content)?;
    let mut workbook = Workbook::from_xlsx_bytes(&bytes)?;
    debug!(filename, sheets = workbook.sheet_count(), "workbook decoded");

    let rule_skips = apply_upload_rules(&mut workbook, &rules.upload_text_rules);
    for skip in &rule_skips {
        warn!(
            sheet = %skip.sheet,
            column = %skip.column,
            reason = ?skip.reason,
            "normalization rule skipped"
        );
    }

    let mut pages = Vec::new();
    let mut skipped = Vec::new();
    for (name, table) in workbook.tables_mut() {
        let source = Column::new(
            SOURCE_FILENAME_COLUMN,
            vec![Value::Text(filename.to_string()); table.row_count()],
        );
        if let Err(err) = table.prepend_column(source) {
            warn!(sheet = name, error = %err, "sheet skipped: source column not prepended");
            skipped.push(SheetSkip {
                sheet: name.to_string(),
                reason: SheetSkipReason::Failed(err.to_string()),
            });
            continue;
        }
        if table.is_empty_table() {
            debug!(sheet = name, "sheet skipped: empty");
            skipped.push(SheetSkip {
                sheet: name.to_string(),
                reason: SheetSkipReason::Empty,
            });
            continue;
        }
        match table.to_parquet_bytes() {
            Ok(blob) => pages.push(Page {
                page_name: name.to_string(),
                content: general_purpose::STANDARD.encode(blob),
            }),
            Err(err) => {
                warn!(sheet = name, error = %err, "sheet skipped: serialization failed");
                skipped.push(SheetSkip {
                    sheet: name.to_string(),
                    reason: SheetSkipReason::Failed(err.to_string()),
                });
            }
        }
    }

    debug!(
        filename,
        pages = pages.len(),
        skipped = skipped.len(),
        "upload converted"
    );
    Ok(UploadOutcome {
        pages,
        skipped,
        rule_skips,
    })
}
