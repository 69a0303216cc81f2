//! In-memory storage adapter
//!
//! Backs dry-run imports and the test suites. Mirrors the SQLite adapter's
//! behavior: batch inserts are atomic and ring numbers are unique among ring
//! records. Dictionary reads are counted so tests can assert the reference
//! cache really is read-through.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::app::models::{DictionaryEntry, EuringRecord, RecordKind, ReferenceTable};
use crate::{Error, Result};

/// In-memory implementation of the storage traits
#[derive(Default)]
pub struct MemoryStore {
    dictionaries: RwLock<HashMap<ReferenceTable, Vec<DictionaryEntry>>>,
    records: RwLock<HashMap<RecordKind, Vec<EuringRecord>>>,
    dictionary_fetches: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents of one dictionary table
    pub fn seed_dictionary(&self, table: ReferenceTable, entries: &[DictionaryEntry]) {
        self.dictionaries
            .write()
            .expect("dictionary lock poisoned")
            .insert(table, entries.to_vec());
    }

    /// Convenience seeding from bare ids, for tests that only need id-sets
    pub fn seed_ids(&self, table: ReferenceTable, ids: &[&str]) {
        let entries: Vec<DictionaryEntry> = ids
            .iter()
            .map(|id| DictionaryEntry {
                id: id.to_string(),
                desc_eng: String::new(),
                desc_rus: String::new(),
                desc_byn: String::new(),
            })
            .collect();
        self.seed_dictionary(table, &entries);
    }

    /// How many times `find` hit this store
    pub fn dictionary_fetch_count(&self) -> usize {
        self.dictionary_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl super::DictionaryStore for MemoryStore {
    async fn find(&self, table: ReferenceTable) -> Result<Vec<DictionaryEntry>> {
        self.dictionary_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .dictionaries
            .read()
            .expect("dictionary lock poisoned")
            .get(&table)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl super::RecordStore for MemoryStore {
    async fn insert_records(&self, kind: RecordKind, records: &[EuringRecord]) -> Result<()> {
        let mut store = self.records.write().expect("record lock poisoned");

        // Validate the whole batch before touching the store so a failure
        // leaves nothing behind, matching the SQLite transaction.
        if kind == RecordKind::Ring {
            let mut seen: HashSet<&str> = store
                .get(&RecordKind::Ring)
                .into_iter()
                .flatten()
                .filter_map(|r| r.ring_number.as_deref())
                .collect();

            for record in records {
                let ring_number = record.ring_number.as_deref().ok_or_else(|| {
                    Error::storage("insert record", "NOT NULL constraint failed: ring_number")
                })?;
                if !seen.insert(ring_number) {
                    return Err(Error::storage(
                        "insert record",
                        format!("UNIQUE constraint failed: ring_number '{}'", ring_number),
                    ));
                }
            }
        }

        store.entry(kind).or_default().extend_from_slice(records);
        Ok(())
    }

    async fn count_records(&self, kind: RecordKind) -> Result<usize> {
        Ok(self
            .records
            .read()
            .expect("record lock poisoned")
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0))
    }

    async fn fetch_records(&self, kind: RecordKind) -> Result<Vec<EuringRecord>> {
        Ok(self
            .records
            .read()
            .expect("record lock poisoned")
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }
}
