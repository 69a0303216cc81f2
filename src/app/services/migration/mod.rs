//! Legacy dataset migration driver
//!
//! Loads historical EURING line files into storage through the batch/funnel
//! loader. Tables are processed strictly sequentially, rings before
//! observations, because observations reference ring numbers created by the
//! ring pass; batch N+1 never starts before batch N's insert has settled.
//!
//! The driver never aborts on bad rows: a multi-hour migration ends with
//! every source line either inserted or individually diagnosed by line
//! number.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::app::adapters::storage::RecordStore;
use crate::app::models::{EuringRecord, RecordKind};
use crate::app::services::batch_loader::{BatchSink, funnel};
use crate::app::services::euring_codec::codec;
use crate::{Error, Result};

/// Outcome of migrating one source file into one table
#[derive(Debug, Clone)]
pub struct TableOutcome {
    /// Destination record kind
    pub kind: RecordKind,

    /// Non-blank source lines read
    pub line_count: usize,

    /// Records that ended up inserted
    pub inserted_count: usize,

    /// Per-line diagnostics for the records that never inserted, as
    /// `(1-based source line, "[ErrorName]: message")`
    pub errors: Vec<(usize, String)>,
}

/// Sequential migration of legacy EURING line files
pub struct MigrationLoader {
    store: Arc<dyn RecordStore>,
    funnel_sizes: Vec<usize>,
}

impl MigrationLoader {
    /// Create a loader over a record store with the funnel's batch-size
    /// sequence
    pub fn new(store: Arc<dyn RecordStore>, funnel_sizes: Vec<usize>) -> Self {
        Self {
            store,
            funnel_sizes,
        }
    }

    /// Migrate the given source files, rings first, observations second.
    ///
    /// Either file may be absent from the run; the other is still processed.
    pub async fn migrate(
        &self,
        rings_path: Option<&Path>,
        observations_path: Option<&Path>,
        show_progress: bool,
    ) -> Result<Vec<TableOutcome>> {
        let mut outcomes = Vec::new();

        if let Some(path) = rings_path {
            outcomes.push(
                self.migrate_file(path, RecordKind::Ring, show_progress)
                    .await?,
            );
        }
        if let Some(path) = observations_path {
            outcomes.push(
                self.migrate_file(path, RecordKind::Observation, show_progress)
                    .await?,
            );
        }

        Ok(outcomes)
    }

    /// Migrate one EURING line file into one table
    pub async fn migrate_file(
        &self,
        path: &Path,
        kind: RecordKind,
        show_progress: bool,
    ) -> Result<TableOutcome> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        info!("Migrating {} file: {}", kind, path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

        // Decode every non-blank line, remembering its source position
        let mut line_numbers = Vec::new();
        let mut records: Vec<EuringRecord> = Vec::new();
        for (position, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            line_numbers.push(position + 1);
            records.push(codec::decode(line));
        }

        let line_count = records.len();
        let progress_bar = show_progress.then(|| {
            let pb = ProgressBar::new(line_count as u64);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .expect("valid progress template")
                .progress_chars("#>-"),
            );
            pb
        });

        let sink = StoreSink {
            store: Arc::clone(&self.store),
            kind,
        };
        let outcome = funnel(&self.funnel_sizes, records, &sink, progress_bar.as_ref()).await;

        if let Some(pb) = progress_bar {
            pb.finish_with_message("done");
        }

        info!(
            "Migration of {} complete: {} of {} inserted, {} diagnosed",
            kind,
            outcome.inserted_count,
            line_count,
            outcome.errors.len()
        );

        Ok(TableOutcome {
            kind,
            line_count,
            inserted_count: outcome.inserted_count,
            errors: outcome
                .errors
                .into_iter()
                .map(|error| (line_numbers[error.index], error.message))
                .collect(),
        })
    }
}

/// Adapts the record store to the funnel's sink seam for one table
struct StoreSink {
    store: Arc<dyn RecordStore>,
    kind: RecordKind,
}

#[async_trait]
impl BatchSink<EuringRecord> for StoreSink {
    async fn insert(&self, chunk: &[EuringRecord]) -> Result<()> {
        self.store.insert_records(self.kind, chunk).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::app::adapters::storage::MemoryStore;

    fn create_test_ring(ring_number: &str) -> EuringRecord {
        EuringRecord {
            ring_number: Some(ring_number.to_string()),
            species_mentioned: Some("12430".to_string()),
            ..Default::default()
        }
    }

    fn write_lines(records: &[EuringRecord]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for record in records {
            writeln!(file, "{}", codec::encode(record)).unwrap();
        }
        file
    }

    #[tokio::test]
    async fn test_migrates_clean_file() {
        let store = Arc::new(MemoryStore::new());
        let loader = MigrationLoader::new(store.clone(), vec![100, 10, 1]);

        let file = write_lines(&[
            create_test_ring("...XA00001"),
            create_test_ring("...XA00002"),
        ]);

        let outcome = loader
            .migrate_file(file.path(), RecordKind::Ring, false)
            .await
            .unwrap();

        assert_eq!(outcome.line_count, 2);
        assert_eq!(outcome.inserted_count, 2);
        assert!(outcome.errors.is_empty());
        assert_eq!(store.count_records(RecordKind::Ring).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_diagnoses_bad_lines_by_line_number() {
        let store = Arc::new(MemoryStore::new());
        let loader = MigrationLoader::new(store.clone(), vec![100, 10, 1]);

        // The third line re-uses the first ring number, which storage rejects
        let file = write_lines(&[
            create_test_ring("...XA00001"),
            create_test_ring("...XA00002"),
            create_test_ring("...XA00001"),
        ]);

        let outcome = loader
            .migrate_file(file.path(), RecordKind::Ring, false)
            .await
            .unwrap();

        assert_eq!(outcome.inserted_count, 2);
        assert_eq!(outcome.errors.len(), 1);
        let (line, message) = &outcome.errors[0];
        assert_eq!(*line, 3);
        assert!(message.starts_with("[StorageError]:"), "got '{}'", message);
        assert_eq!(store.count_records(RecordKind::Ring).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped_without_shifting_diagnostics() {
        let store = Arc::new(MemoryStore::new());
        let loader = MigrationLoader::new(store.clone(), vec![10, 1]);

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", codec::encode(&create_test_ring("...XA00001"))).unwrap();
        writeln!(file).unwrap();
        // Line 3 has no ring number, which storage rejects for rings
        writeln!(file, "{}", codec::encode(&EuringRecord::default())).unwrap();

        let outcome = loader
            .migrate_file(file.path(), RecordKind::Ring, false)
            .await
            .unwrap();

        assert_eq!(outcome.line_count, 2);
        assert_eq!(outcome.inserted_count, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].0, 3);
    }

    #[tokio::test]
    async fn test_rings_load_before_observations() {
        let store = Arc::new(MemoryStore::new());
        let loader = MigrationLoader::new(store.clone(), vec![10, 1]);

        let rings = write_lines(&[create_test_ring("...XA00001")]);
        let observations = write_lines(&[create_test_ring("...XA00001")]);

        let outcomes = loader
            .migrate(Some(rings.path()), Some(observations.path()), false)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].kind, RecordKind::Ring);
        assert_eq!(outcomes[1].kind, RecordKind::Observation);
        assert_eq!(store.count_records(RecordKind::Ring).await.unwrap(), 1);
        assert_eq!(
            store.count_records(RecordKind::Observation).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        let loader = MigrationLoader::new(store, vec![10, 1]);

        let result = loader
            .migrate_file(Path::new("/nonexistent/rings.psv"), RecordKind::Ring, false)
            .await;
        assert!(result.is_err());
    }
}
