//! Test utilities shared across the bulk-import test modules

use std::sync::Arc;

use crate::app::adapters::storage::MemoryStore;
use crate::app::models::ReferenceTable;
use crate::app::services::reference_cache::ReferenceCache;

use super::pipeline::BulkImporter;
use super::worksheet::Worksheet;

mod mappers_tests;

/// A ring worksheet row that passes every stage against the seeded store
pub const VALID_RING_ROW: &str =
    "...XA00001,BYM,12430,F,3,N,M,N,N,,,2019-08-05,06:00,BY01,Minsk,53.5,27.25,note";

/// An observation worksheet row that passes every stage against the seeded
/// store
pub const VALID_OBSERVATION_ROW: &str =
    "...XA00001,BYM,1,ZZ,12430,F,4,N,8,20,N,0,2020-08-05,,BY02,Vitebsk,53.5,27.25,12,270,365,seen again";

/// Helper to build a worksheet from inline CSV
pub fn create_worksheet(csv: &str) -> Worksheet {
    Worksheet::from_reader(csv.as_bytes()).unwrap()
}

/// Helper to build a ring worksheet from data-row literals
pub fn create_ring_worksheet(rows: &[&str]) -> Worksheet {
    let mut csv = crate::constants::RING_WORKSHEET_COLUMNS.join(",");
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    create_worksheet(&csv)
}

/// Helper to build an observation worksheet from data-row literals
pub fn create_observation_worksheet(rows: &[&str]) -> Worksheet {
    let mut csv = crate::constants::OBSERVATION_WORKSHEET_COLUMNS.join(",");
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    create_worksheet(&csv)
}

/// Helper to create a store seeded with the code universe the row literals
/// above draw from
pub fn create_seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    store.seed_ids(ReferenceTable::Species, &["12430", "11870"]);
    store.seed_ids(ReferenceTable::Sex, &["F", "M", "U"]);
    store.seed_ids(ReferenceTable::Age, &["1", "3", "4"]);
    store.seed_ids(ReferenceTable::Status, &["N", "U"]);
    store.seed_ids(ReferenceTable::CatchingMethod, &["M", "L"]);
    store.seed_ids(ReferenceTable::CatchingLures, &["N", "U"]);
    store.seed_ids(ReferenceTable::PlaceCode, &["BY01", "BY02"]);
    store.seed_ids(ReferenceTable::Condition, &["8"]);
    store.seed_ids(ReferenceTable::Circumstances, &["20"]);
    store.seed_ids(ReferenceTable::Manipulated, &["N", "H"]);
    store.seed_ids(ReferenceTable::MovedBefore, &["0", "2"]);
    store.seed_ids(ReferenceTable::MetalRingInfo, &["1", "4"]);
    store.seed_ids(ReferenceTable::OtherMarks, &["ZZ", "BB"]);
    Arc::new(store)
}

/// Helper to create an importer over a seeded in-memory store.
///
/// Returns the store alongside the importer so tests can inspect what was
/// persisted.
pub fn create_test_importer() -> (Arc<MemoryStore>, BulkImporter) {
    let store = create_seeded_store();
    let cache = Arc::new(ReferenceCache::new(store.clone()));
    (store.clone(), BulkImporter::new(cache, store))
}
