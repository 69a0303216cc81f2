//! Structural clone detection
//!
//! Surviving rows are grouped by their serialized raw-cell content. A row
//! sharing its key with an earlier row is flagged as a possible clone of
//! that row. The detector only reports; whether clones block the commit is
//! the pipeline's policy.

use std::collections::HashMap;

use tracing::debug;

/// A detected clone: the offending row and the earlier row it duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClone {
    /// Worksheet row number of the duplicate
    pub row_number: usize,

    /// Worksheet row number of the first occurrence
    pub of_row: usize,
}

/// Detect clones among `(row_number, structural_key)` pairs, preserving
/// worksheet order
pub fn detect_clones(rows: &[(usize, String)]) -> Vec<RowClone> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut clones = Vec::new();

    for (row_number, key) in rows {
        match first_seen.get(key.as_str()) {
            Some(&of_row) => {
                debug!("Row {} is a structural clone of row {}", row_number, of_row);
                clones.push(RowClone {
                    row_number: *row_number,
                    of_row,
                });
            }
            None => {
                first_seen.insert(key, *row_number);
            }
        }
    }

    clones
}
