//! Header verification and worksheet templates
//!
//! The first worksheet row must contain every expected column name for the
//! target record kind, matched exactly. A missing name is a structural
//! precondition failure: the whole upload aborts before any data row is read.

use std::collections::HashMap;

use crate::app::models::RecordKind;
use crate::{Error, Result};

use super::worksheet::Worksheet;

/// Verify the worksheet header row against the expected column list.
///
/// Returns the column index of every expected name. Extra columns are
/// ignored; any missing name fails the whole upload with the missing list.
pub fn check_headers(worksheet: &Worksheet, kind: RecordKind) -> Result<HashMap<String, usize>> {
    let mut positions = HashMap::new();
    let mut missing = Vec::new();

    for &expected in kind.worksheet_columns() {
        match worksheet
            .headers
            .iter()
            .position(|header| header.trim() == expected)
        {
            Some(index) => {
                positions.insert(expected.to_string(), index);
            }
            None => missing.push(expected.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(Error::MissingHeaders { missing });
    }

    Ok(positions)
}

/// Render an empty worksheet template for the record kind: the expected
/// header row and no data rows, used to solicit correctly-shaped re-imports.
pub fn template(kind: RecordKind) -> String {
    let mut line = kind.worksheet_columns().join(",");
    line.push('\n');
    line
}
