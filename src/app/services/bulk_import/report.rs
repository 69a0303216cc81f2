//! Row-addressable import result payload
//!
//! The pipeline always returns this report to the caller, whether the upload
//! committed or was rejected. A rejected upload carries a zero imported
//! count together with the per-row diagnostics, so the uploader can fix
//! exactly the offending rows and re-upload.

use serde::{Deserialize, Serialize};

/// Diagnostics for one worksheet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowReport {
    /// 1-based worksheet row the diagnostics apply to
    pub row_number: usize,

    /// Error descriptions for that row
    pub result: Vec<String>,
}

/// Result payload of one bulk import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Data rows present in the worksheet
    pub row_count: usize,

    /// Rows that were entirely blank and skipped
    pub empty_row_count: usize,

    /// Records persisted; zero when the upload was rejected
    pub imported_count: usize,

    /// Rows rejected by mapping or static-constraint validation
    pub format_errors: Vec<RowReport>,

    /// Rows rejected because a coded field is unknown to its dictionary
    #[serde(rename = "EURINGErrors")]
    pub euring_errors: Vec<RowReport>,

    /// Rows flagged as structural clones of an earlier row
    pub clones: Vec<usize>,
}

impl ImportReport {
    /// Create an empty report for a worksheet of `row_count` data rows
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            empty_row_count: 0,
            imported_count: 0,
            format_errors: Vec::new(),
            euring_errors: Vec::new(),
            clones: Vec::new(),
        }
    }

    /// Whether every stage passed and the upload may commit
    pub fn is_clean(&self) -> bool {
        self.format_errors.is_empty() && self.euring_errors.is_empty() && self.clones.is_empty()
    }

    /// Whether the upload was committed
    pub fn is_committed(&self) -> bool {
        self.imported_count > 0
    }
}
