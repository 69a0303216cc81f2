//! Storage adapters for records and dictionary tables
//!
//! The engine consumes storage through two narrow traits: [`DictionaryStore`]
//! supplies full dictionary tables to the reference cache, and
//! [`RecordStore`] persists exchange records with an atomic bulk insert.
//!
//! Two implementations are provided: [`SqliteStore`] for the real database
//! and [`MemoryStore`] for dry-run imports and tests.

use async_trait::async_trait;

use crate::app::models::{DictionaryEntry, EuringRecord, RecordKind, ReferenceTable};
use crate::Result;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Read access to dictionary tables.
///
/// This is the only dictionary operation the engine requires; the reference
/// cache calls it once per table and serves every later read itself.
#[async_trait]
pub trait DictionaryStore: Send + Sync {
    /// Fetch the full contents of one dictionary table
    async fn find(&self, table: ReferenceTable) -> Result<Vec<DictionaryEntry>>;
}

/// Persistence of exchange records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a batch of records atomically: either every record of the
    /// batch is persisted or none is.
    async fn insert_records(&self, kind: RecordKind, records: &[EuringRecord]) -> Result<()>;

    /// Count persisted records of one kind
    async fn count_records(&self, kind: RecordKind) -> Result<usize>;

    /// Fetch all persisted records of one kind, in insertion order
    async fn fetch_records(&self, kind: RecordKind) -> Result<Vec<EuringRecord>>;
}
