//! In-memory worksheet value and CSV ingestion
//!
//! The pipeline stages operate on a [`Worksheet`]: a header row plus data
//! rows of raw string cells, each tagged with its 1-based worksheet row
//! number. Uploads arrive as CSV-exported worksheets; a richer reader can be
//! put in front without touching the stages.

use std::io::Read;
use std::path::Path;

use crate::{Error, Result};

/// One uploaded worksheet: the header row and the data rows below it
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// First-row header cells, verbatim
    pub headers: Vec<String>,

    /// Data rows in worksheet order
    pub rows: Vec<WorksheetRow>,
}

/// One data row with its original position
#[derive(Debug, Clone)]
pub struct WorksheetRow {
    /// 1-based worksheet row number; the header row is row 1
    pub row_number: usize,

    /// Raw cell contents, verbatim
    pub cells: Vec<String>,
}

impl Worksheet {
    /// Read a worksheet from CSV bytes. The first record is the header row;
    /// ragged rows are tolerated and padded at access time.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records();

        let headers = match records.next() {
            Some(record) => {
                let record = record.map_err(|e| {
                    Error::worksheet_parsing("Failed to read header row", Some(e))
                })?;
                record.iter().map(|cell| cell.to_string()).collect()
            }
            None => {
                return Err(Error::worksheet_parsing(
                    "Worksheet is empty, expected a header row",
                    None,
                ));
            }
        };

        let mut rows = Vec::new();
        for (position, record) in records.enumerate() {
            let record = record.map_err(|e| {
                Error::worksheet_parsing(
                    format!("Failed to read worksheet row {}", position + 2),
                    Some(e),
                )
            })?;
            rows.push(WorksheetRow {
                row_number: position + 2,
                cells: record.iter().map(|cell| cell.to_string()).collect(),
            });
        }

        Ok(Worksheet { headers, rows })
    }

    /// Read a worksheet from a CSV file
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        Self::from_reader(file)
    }
}

impl WorksheetRow {
    /// Cell at a column index, empty when the row is ragged
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// A row is empty when every cell is blank
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }

    /// Serialized row content used as the structural-equality key for clone
    /// detection. The separator cannot occur in CSV cell data.
    pub fn structural_key(&self) -> String {
        self.cells.join("\u{001F}")
    }
}
