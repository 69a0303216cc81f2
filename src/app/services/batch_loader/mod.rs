//! Batched bulk insertion with funnel retry
//!
//! Bulk-inserts a large list of prepared records with resilience to a small
//! number of malformed rows poisoning an otherwise-good batch. Records are
//! inserted in fixed-size chunks; failed chunks are retried at progressively
//! finer batch sizes until, at granularity 1, each still-failing record is
//! diagnosed individually.
//!
//! Single-record inserts for a multi-hundred-thousand-row migration are
//! prohibitively slow; one large batch aborts entirely on one bad row. The
//! funnel re-attempts failed chunks at finer granularity, keeping throughput
//! on the common path and precise diagnostics on the rare one.

use async_trait::async_trait;

use crate::Result;

pub mod funnel;

#[cfg(test)]
pub mod tests;

pub use funnel::{funnel, insert_batched};

/// Destination of a bulk insertion.
///
/// One `insert` call must be atomic: either the whole chunk is persisted or
/// none of it is. The funnel relies on this to re-attempt failed chunks
/// without double-inserting.
#[async_trait]
pub trait BatchSink<R>: Send + Sync
where
    R: Send + Sync,
{
    /// Insert one chunk of records
    async fn insert(&self, chunk: &[R]) -> Result<()>;
}

/// One record that failed insertion, tagged with its position in the
/// original record list
#[derive(Debug, Clone)]
pub struct FailedRow<R> {
    /// Zero-based position in the caller's record list
    pub index: usize,

    /// The record itself, kept for finer retry passes
    pub record: R,

    /// Captured storage error, populated only at the finest granularity
    pub error: Option<String>,
}

/// Result of one batched insertion pass
#[derive(Debug, Clone)]
pub struct BatchOutcome<R> {
    /// Records inserted by this pass
    pub inserted_count: usize,

    /// Members of every failed chunk; the storage error is swallowed at this
    /// stage, only chunk membership is tracked
    pub failed_rows: Vec<FailedRow<R>>,
}

/// One individually diagnosed record after the funnel has converged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Zero-based position in the caller's record list
    pub index: usize,

    /// Diagnostic in the form `"[ErrorName]: message"`
    pub message: String,
}

/// Final result of a funnel run: every record ends either inserted or
/// individually diagnosed
#[derive(Debug, Clone)]
pub struct FunnelOutcome {
    /// Total records inserted across all passes
    pub inserted_count: usize,

    /// Diagnostics for the records that never inserted
    pub errors: Vec<RowError>,
}
