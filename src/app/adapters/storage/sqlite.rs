//! SQLite-backed storage adapter
//!
//! Records are persisted with their exchange encoding as the canonical
//! serialization, alongside the columns the engine itself queries. Ring
//! numbers are unique among ring records, so re-inserting an existing ring
//! fails per row and gets diagnosed by the migration funnel.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::Connection;

use crate::app::models::{DictionaryEntry, EuringRecord, RecordKind, ReferenceTable};
use crate::app::services::euring_codec::codec;
use crate::{Error, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS reference_codes (
    table_key TEXT NOT NULL,
    id        TEXT NOT NULL,
    desc_eng  TEXT NOT NULL DEFAULT '',
    desc_rus  TEXT NOT NULL DEFAULT '',
    desc_byn  TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (table_key, id)
);

CREATE TABLE IF NOT EXISTS records (
    id          INTEGER PRIMARY KEY,
    kind        TEXT NOT NULL,
    ring_number TEXT,
    euring_line TEXT NOT NULL,
    CHECK (kind != 'ring' OR ring_number IS NOT NULL)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_ring_number
    ON records (ring_number) WHERE kind = 'ring';
";

/// SQLite implementation of the storage traits
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file and ensure the schema is present
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io(format!("Failed to create {}", parent.display()), e))?;
        }

        let connection = Connection::open(path)
            .map_err(|e| Error::storage("open database", e.to_string()))?;
        Self::with_connection(connection)
    }

    /// Open an in-memory database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()
            .map_err(|e| Error::storage("open in-memory database", e.to_string()))?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .execute_batch(SCHEMA)
            .map_err(|e| Error::storage("initialise schema", e.to_string()))?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Replace the contents of one dictionary table.
    ///
    /// Dictionary mutation is an out-of-band admin operation; callers owning
    /// a reference cache must clear it afterwards.
    pub fn seed_dictionary(
        &self,
        table: ReferenceTable,
        entries: &[DictionaryEntry],
    ) -> Result<()> {
        let mut connection = self.lock_connection();
        let transaction = connection
            .transaction()
            .map_err(|e| Error::storage("begin seed transaction", e.to_string()))?;

        transaction
            .execute(
                "DELETE FROM reference_codes WHERE table_key = ?1",
                [table.key()],
            )
            .map_err(|e| Error::storage("clear dictionary table", e.to_string()))?;

        {
            let mut insert = transaction
                .prepare_cached(
                    "INSERT INTO reference_codes
                        (table_key, id, desc_eng, desc_rus, desc_byn)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .map_err(|e| Error::storage("prepare dictionary insert", e.to_string()))?;

            for entry in entries {
                insert
                    .execute((
                        table.key(),
                        &entry.id,
                        &entry.desc_eng,
                        &entry.desc_rus,
                        &entry.desc_byn,
                    ))
                    .map_err(|e| Error::storage("insert dictionary entry", e.to_string()))?;
            }
        }

        transaction
            .commit()
            .map_err(|e| Error::storage("commit seed transaction", e.to_string()))
    }

    fn lock_connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl super::DictionaryStore for SqliteStore {
    async fn find(&self, table: ReferenceTable) -> Result<Vec<DictionaryEntry>> {
        let connection = self.lock_connection();
        let mut statement = connection
            .prepare_cached(
                "SELECT id, desc_eng, desc_rus, desc_byn
                 FROM reference_codes WHERE table_key = ?1 ORDER BY id",
            )
            .map_err(|e| Error::storage("prepare dictionary query", e.to_string()))?;

        let rows = statement
            .query_map([table.key()], |row| {
                Ok(DictionaryEntry {
                    id: row.get(0)?,
                    desc_eng: row.get(1)?,
                    desc_rus: row.get(2)?,
                    desc_byn: row.get(3)?,
                })
            })
            .map_err(|e| Error::storage("query dictionary table", e.to_string()))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::storage("read dictionary rows", e.to_string()))
    }
}

#[async_trait]
impl super::RecordStore for SqliteStore {
    async fn insert_records(&self, kind: RecordKind, records: &[EuringRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut connection = self.lock_connection();
        let transaction = connection
            .transaction()
            .map_err(|e| Error::storage("begin insert transaction", e.to_string()))?;

        {
            let mut insert = transaction
                .prepare_cached(
                    "INSERT INTO records (kind, ring_number, euring_line)
                     VALUES (?1, ?2, ?3)",
                )
                .map_err(|e| Error::storage("prepare record insert", e.to_string()))?;

            for record in records {
                insert
                    .execute((
                        kind.to_string(),
                        record.ring_number.as_deref(),
                        codec::encode(record),
                    ))
                    .map_err(|e| Error::storage("insert record", e.to_string()))?;
            }
        }

        transaction
            .commit()
            .map_err(|e| Error::storage("commit insert transaction", e.to_string()))
    }

    async fn count_records(&self, kind: RecordKind) -> Result<usize> {
        let connection = self.lock_connection();
        let count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM records WHERE kind = ?1",
                [kind.to_string()],
                |row| row.get(0),
            )
            .map_err(|e| Error::storage("count records", e.to_string()))?;
        Ok(count as usize)
    }

    async fn fetch_records(&self, kind: RecordKind) -> Result<Vec<EuringRecord>> {
        let connection = self.lock_connection();
        let mut statement = connection
            .prepare_cached("SELECT euring_line FROM records WHERE kind = ?1 ORDER BY id")
            .map_err(|e| Error::storage("prepare record query", e.to_string()))?;

        let lines = statement
            .query_map([kind.to_string()], |row| row.get::<_, String>(0))
            .map_err(|e| Error::storage("query records", e.to_string()))?;

        let mut records = Vec::new();
        for line in lines {
            let line = line.map_err(|e| Error::storage("read record row", e.to_string()))?;
            records.push(codec::decode(&line));
        }
        Ok(records)
    }
}
