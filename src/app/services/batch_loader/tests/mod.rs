//! Test utilities for the batch/funnel loader

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{Error, Result};

use super::BatchSink;

// Test modules
mod funnel_tests;

/// Test sink over plain integers: negative values are "malformed" and fail
/// whatever chunk they appear in, mimicking an atomic storage batch.
#[derive(Default)]
pub struct RejectNegativesSink {
    insert_calls: AtomicUsize,
}

impl RejectNegativesSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many chunks were attempted
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BatchSink<i64> for RejectNegativesSink {
    async fn insert(&self, chunk: &[i64]) -> Result<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        match chunk.iter().find(|&&value| value < 0) {
            Some(bad) => Err(Error::storage(
                "insert chunk",
                format!("negative value {}", bad),
            )),
            None => Ok(()),
        }
    }
}

/// Helper building a record list of `total` values with the given positions
/// replaced by negative (malformed) markers
pub fn records_with_poison(total: usize, poisoned: &[usize]) -> Vec<i64> {
    (0..total)
        .map(|i| {
            if poisoned.contains(&i) {
                -(i as i64 + 1)
            } else {
                i as i64
            }
        })
        .collect()
}
