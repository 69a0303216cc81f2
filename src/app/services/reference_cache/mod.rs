//! Reference code cache for dictionary table lookups
//!
//! This module provides a read-through cache over the dictionary tables
//! (species, sex, age, status, ...). Each table is fetched from storage once
//! and served from memory for the rest of the process lifetime; the import
//! pipelines validate every coded field against the cached id-sets.
//!
//! The cache is constructed once at startup and passed by `Arc` into the
//! pipelines. Readers receive immutable `Arc` snapshots, so concurrent
//! imports share the warm cache without locking beyond the map lookup.
//! There is no write path: dictionary mutation is an out-of-band admin
//! operation followed by an explicit [`ReferenceCache::clear`].

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::app::adapters::storage::DictionaryStore;
use crate::app::models::{DictionaryEntry, Language, LocalizedEntry, ReferenceTable};
use crate::Result;

#[cfg(test)]
pub mod tests;

/// Read-through, per-table, per-language cache over the dictionary tables
pub struct ReferenceCache {
    store: Arc<dyn DictionaryStore>,

    /// Full table snapshots, keyed by table
    tables: RwLock<HashMap<ReferenceTable, Arc<Vec<DictionaryEntry>>>>,

    /// Id-sets derived from the table snapshots, cached independently
    id_sets: RwLock<HashMap<ReferenceTable, Arc<HashSet<String>>>>,

    /// Localized projections, keyed by table and language
    localized: RwLock<HashMap<(ReferenceTable, Language), Arc<Vec<LocalizedEntry>>>>,
}

impl ReferenceCache {
    /// Create an empty cache over the given dictionary store
    pub fn new(store: Arc<dyn DictionaryStore>) -> Self {
        Self {
            store,
            tables: RwLock::new(HashMap::new()),
            id_sets: RwLock::new(HashMap::new()),
            localized: RwLock::new(HashMap::new()),
        }
    }

    /// Get the full contents of a dictionary table.
    ///
    /// The first call per table fetches from storage; every later call is
    /// served from the snapshot until [`clear`](Self::clear).
    pub async fn get_all(&self, table: ReferenceTable) -> Result<Arc<Vec<DictionaryEntry>>> {
        if let Some(snapshot) = self.tables.read().expect("table lock poisoned").get(&table) {
            return Ok(Arc::clone(snapshot));
        }

        debug!("Reference cache miss, fetching table '{}'", table);
        let snapshot = Arc::new(self.store.find(table).await?);

        let mut tables = self.tables.write().expect("table lock poisoned");
        Ok(Arc::clone(
            tables.entry(table).or_insert(snapshot),
        ))
    }

    /// Get the id-set of a dictionary table for O(1) membership tests
    pub async fn get_all_ids(&self, table: ReferenceTable) -> Result<Arc<HashSet<String>>> {
        if let Some(ids) = self.id_sets.read().expect("id-set lock poisoned").get(&table) {
            return Ok(Arc::clone(ids));
        }

        let entries = self.get_all(table).await?;
        let ids = Arc::new(
            entries
                .iter()
                .map(|entry| entry.id.clone())
                .collect::<HashSet<String>>(),
        );

        let mut id_sets = self.id_sets.write().expect("id-set lock poisoned");
        Ok(Arc::clone(id_sets.entry(table).or_insert(ids)))
    }

    /// Get a dictionary table projected to one description language.
    ///
    /// Unrecognized language keys fall back to English.
    pub async fn filter_by_lang(
        &self,
        table: ReferenceTable,
        lang: &str,
    ) -> Result<Arc<Vec<LocalizedEntry>>> {
        let language = Language::from_key(lang);
        let key = (table, language);

        if let Some(rows) = self
            .localized
            .read()
            .expect("localized lock poisoned")
            .get(&key)
        {
            return Ok(Arc::clone(rows));
        }

        let entries = self.get_all(table).await?;
        let rows = Arc::new(
            entries
                .iter()
                .map(|entry| language.project(entry))
                .collect::<Vec<LocalizedEntry>>(),
        );

        let mut localized = self.localized.write().expect("localized lock poisoned");
        Ok(Arc::clone(localized.entry(key).or_insert(rows)))
    }

    /// Fetch every dictionary table up front so later validation reads are
    /// cache hits
    pub async fn warm(&self) -> Result<()> {
        for &table in ReferenceTable::all() {
            self.get_all_ids(table).await?;
        }
        debug!("Reference cache warmed for {} tables", ReferenceTable::all().len());
        Ok(())
    }

    /// Evict every cached snapshot. The next read per table fetches from
    /// storage again.
    pub fn clear(&self) {
        self.tables.write().expect("table lock poisoned").clear();
        self.id_sets.write().expect("id-set lock poisoned").clear();
        self.localized
            .write()
            .expect("localized lock poisoned")
            .clear();
    }
}
