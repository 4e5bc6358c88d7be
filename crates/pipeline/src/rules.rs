//! Table-driven normalization rules
//!
//! The quirky-column lists are data, not control flow: deployments can
//! replace either list from a JSON file without touching the pipeline.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One (sheet, column) pair whose values are forced to text during
/// upload conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetColumnRule {
    pub sheet: String,
    pub column: String,
}

impl SheetColumnRule {
    pub fn new<S: Into<String>, C: Into<String>>(sheet: S, column: C) -> Self {
        Self {
            sheet: sheet.into(),
            column: column.into(),
        }
    }
}

/// Columns whose inferred types are known to wobble between uploads.
///
/// `upload_text_rules` is applied sheet by sheet while converting an
/// upload. `merge_text_columns` is applied to the merged table, by
/// column name alone, wherever the column appears. A rules file may
/// override either list; a field absent from the file keeps its
/// built-in value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default = "default_upload_rules")]
    pub upload_text_rules: Vec<SheetColumnRule>,
    #[serde(default = "default_merge_columns")]
    pub merge_text_columns: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            upload_text_rules: default_upload_rules(),
            merge_text_columns: default_merge_columns(),
        }
    }
}

impl Rules {
    /// Load a rules override from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

fn default_upload_rules() -> Vec<SheetColumnRule> {
    vec![
        SheetColumnRule::new("vHBA", "vHBAPci"),
        SheetColumnRule::new("vNIC", "vNicPci"),
        SheetColumnRule::new("vMultiPath", "vMultiPathModel"),
    ]
}

fn default_merge_columns() -> Vec<String> {
    vec![
        "vNicDuplex".to_string(),
        "vInfoVISDKAPI".to_string(),
        "vHostBiosDate".to_string(),
        "vMultiPathRevision".to_string(),
        "vMultiPathUUID".to_string(),
    ]
}
