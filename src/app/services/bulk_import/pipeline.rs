//! Import stage orchestration and the all-or-nothing commit

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::adapters::storage::RecordStore;
use crate::app::models::{EuringRecord, RecordKind};
use crate::app::services::reference_cache::ReferenceCache;
use crate::Result;

use super::duplicates::detect_clones;
use super::headers::check_headers;
use super::mappers::{CellMapper, build_record};
use super::report::{ImportReport, RowReport};
use super::validate::{validate_constraints, validate_reference_codes};
use super::worksheet::{Worksheet, WorksheetRow};

/// Orchestrates one worksheet upload through the validation stages to an
/// atomic commit.
///
/// The importer holds the warm reference cache and the record store by
/// handle, so concurrent uploads share both.
pub struct BulkImporter {
    cache: Arc<ReferenceCache>,
    store: Arc<dyn RecordStore>,
}

impl BulkImporter {
    /// Create an importer over a reference cache and a record store
    pub fn new(cache: Arc<ReferenceCache>, store: Arc<dyn RecordStore>) -> Self {
        Self { cache, store }
    }

    /// Run one worksheet through the full pipeline.
    ///
    /// A missing header column is fatal and returns an error before any data
    /// row is read. Every later failure is recovered into the report: the
    /// upload commits only when there are zero format errors, zero reference
    /// errors and zero clones, and then in a single atomic insert. Partial
    /// success is never silently committed.
    pub async fn import(&self, worksheet: &Worksheet, kind: RecordKind) -> Result<ImportReport> {
        info!(
            "Importing {} worksheet: {} data rows",
            kind,
            worksheet.rows.len()
        );

        // HeaderCheck: structural precondition for the whole upload
        let columns = check_headers(worksheet, kind)?;

        let mut report = ImportReport::new(worksheet.rows.len());

        // RowParse + FormatValidate
        let mut survivors: Vec<(usize, String, EuringRecord)> = Vec::new();
        for row in &worksheet.rows {
            if row.is_empty() {
                report.empty_row_count += 1;
                continue;
            }

            match parse_row(row, &columns, kind) {
                Err(errors) => report.format_errors.push(RowReport {
                    row_number: row.row_number,
                    result: errors,
                }),
                Ok(record) => {
                    let violations = validate_constraints(&record, kind);
                    if violations.is_empty() {
                        survivors.push((row.row_number, row.structural_key(), record));
                    } else {
                        report.format_errors.push(RowReport {
                            row_number: row.row_number,
                            result: violations.iter().map(ToString::to_string).collect(),
                        });
                    }
                }
            }
        }

        // ReferenceValidate against the cached dictionary id-sets
        let mut validated: Vec<(usize, String, EuringRecord)> = Vec::new();
        for (row_number, key, record) in survivors {
            let failing = validate_reference_codes(&record, &self.cache).await?;
            if failing.is_empty() {
                validated.push((row_number, key, record));
            } else {
                report.euring_errors.push(RowReport {
                    row_number,
                    result: failing,
                });
            }
        }

        // DuplicateDetect over serialized row content
        let keyed: Vec<(usize, String)> = validated
            .iter()
            .map(|(row_number, key, _)| (*row_number, key.clone()))
            .collect();
        report.clones = detect_clones(&keyed)
            .iter()
            .map(|clone| clone.row_number)
            .collect();

        // Commit gate: strict all-or-nothing
        if report.is_clean() {
            let records: Vec<EuringRecord> = validated
                .into_iter()
                .map(|(_, _, record)| record)
                .collect();
            if !records.is_empty() {
                self.store.insert_records(kind, &records).await?;
                report.imported_count = records.len();
            }
            info!("Import committed: {} records", report.imported_count);
        } else {
            warn!(
                "Import rejected: {} format errors, {} reference errors, {} clones; nothing committed",
                report.format_errors.len(),
                report.euring_errors.len(),
                report.clones.len()
            );
        }

        Ok(report)
    }
}

/// Map one data row through the column-specific mappers.
///
/// Returns the assembled record, or every per-field mapping error when any
/// cell fails its mapper.
fn parse_row(
    row: &WorksheetRow,
    columns: &HashMap<String, usize>,
    kind: RecordKind,
) -> std::result::Result<EuringRecord, Vec<String>> {
    let mut values = HashMap::new();
    let mut errors = Vec::new();

    for &column in kind.worksheet_columns() {
        let index = columns[column];
        match CellMapper::for_column(column).apply(row.cell(index)) {
            Ok(value) => {
                values.insert(column.to_string(), value);
            }
            Err(message) => errors.push(format!("{}: {}", column, message)),
        }
    }

    if errors.is_empty() {
        Ok(build_record(kind, &values))
    } else {
        Err(errors)
    }
}
