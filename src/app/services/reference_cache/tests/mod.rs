//! Test utilities for the reference cache

use std::sync::Arc;

use crate::app::adapters::storage::MemoryStore;
use crate::app::models::DictionaryEntry;

use super::ReferenceCache;


/// Helper to create a cache over a seeded in-memory store.
///
/// Returns the store alongside the cache so tests can count storage reads.
pub fn create_test_cache() -> (Arc<MemoryStore>, ReferenceCache) {
    let store = Arc::new(MemoryStore::new());
    let cache = ReferenceCache::new(store.clone());
    (store, cache)
}

/// Helper to create a dictionary entry with distinct per-language texts
pub fn create_test_entry(id: &str) -> DictionaryEntry {
    DictionaryEntry {
        id: id.to_string(),
        desc_eng: format!("{} english", id),
        desc_rus: format!("{} russian", id),
        desc_byn: format!("{} belarusian", id),
    }
}
