//! Force-to-text normalization passes
//!
//! Certain columns carry values whose inferred type is semantically
//! wrong (numeric-looking identifiers, mixed revision strings). These
//! passes rewrite such columns to text in place, driven by the rule
//! lists in [`crate::rules`].

use crate::rules::SheetColumnRule;
use sheetpress_table::{Column, Table, Value, Workbook};

/// Why a normalization rule did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSkipReason {
    /// The rule's sheet is not present in this workbook.
    SheetMissing,
    /// The sheet exists but lacks the rule's column.
    ColumnMissing,
}

/// Report entry for a rule that was skipped instead of applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSkip {
    pub sheet: String,
    pub column: String,
    pub reason: RuleSkipReason,
}

/// Convert every non-null value in the column to its text
/// representation, in place. Nulls stay null; text stays as is.
pub fn force_text(column: &mut Column) {
    for value in column.values_mut() {
        match value {
            Value::Null | Value::Text(_) => {}
            other => {
                let text = other.to_string();
                *other = Value::Text(text);
            }
        }
    }
}

/// Apply the upload-time rules to a workbook.
///
/// Rules whose sheet or column is absent are reported rather than
/// applied; heterogeneous uploads are not expected to carry every
/// known sheet.
pub fn apply_upload_rules(workbook: &mut Workbook, rules: &[SheetColumnRule]) -> Vec<RuleSkip> {
    let mut skipped = Vec::new();
    for rule in rules {
        match workbook.table_mut(&rule.sheet) {
            Ok(table) => match table.column_mut(&rule.column) {
                Ok(column) => force_text(column),
                Err(_) => skipped.push(RuleSkip {
                    sheet: rule.sheet.clone(),
                    column: rule.column.clone(),
                    reason: RuleSkipReason::ColumnMissing,
                }),
            },
            Err(_) => skipped.push(RuleSkip {
                sheet: rule.sheet.clone(),
                column: rule.column.clone(),
                reason: RuleSkipReason::SheetMissing,
            }),
        }
    }
    skipped
}

/// Apply the merge-time pass to an already concatenated table.
/// Configured columns not present in the table are silently skipped.
pub fn apply_merge_rules(table: &mut Table, columns: &[String]) {
    for name in columns {
        if let Ok(column) = table.column_mut(name) {
            force_text(column);
        }
    }
}
