//! Batched insertion passes and the shrinking-granularity funnel

use indicatif::ProgressBar;
use tracing::{debug, info};

use super::{BatchOutcome, BatchSink, FailedRow, FunnelOutcome, RowError};

/// Insert records in fixed-size chunks.
///
/// A chunk that fails is recorded wholesale: the storage error is swallowed
/// and only chunk membership is tracked, ready for a finer retry pass. With
/// `batch_size` 1 the error of each failing insert is captured instead.
pub async fn insert_batched<R>(
    records: Vec<R>,
    batch_size: usize,
    sink: &dyn BatchSink<R>,
) -> BatchOutcome<R>
where
    R: Clone + Send + Sync,
{
    let rows = index_rows(records);
    let (inserted_count, failed_rows) = run_pass(rows, batch_size, sink, batch_size == 1).await;
    BatchOutcome {
        inserted_count,
        failed_rows,
    }
}

/// Run records through a descending sequence of batch sizes.
///
/// Each pass re-attempts only the currently-failing set at the next, finer
/// size. On the final pass the storage error of every still-failing insert is
/// captured, so the run converges in at most `sizes.len()` passes with every
/// record either inserted or individually diagnosed. Failures never
/// propagate past this function.
pub async fn funnel<R>(
    sizes: &[usize],
    records: Vec<R>,
    sink: &dyn BatchSink<R>,
    progress_bar: Option<&ProgressBar>,
) -> FunnelOutcome
where
    R: Clone + Send + Sync,
{
    let total = records.len();
    let mut pending = index_rows(records);
    let mut inserted_count = 0;

    for (pass, &batch_size) in sizes.iter().enumerate() {
        if pending.is_empty() {
            break;
        }

        let final_pass = pass + 1 == sizes.len();
        let attempted = pending.len();
        let (inserted, failed) =
            run_pass(pending, batch_size, sink, final_pass || batch_size == 1).await;

        inserted_count += inserted;
        pending = failed;

        info!(
            "Funnel pass {} (batch size {}): attempted {}, inserted {}, still failing {}",
            pass + 1,
            batch_size,
            attempted,
            inserted,
            pending.len()
        );
        if let Some(pb) = progress_bar {
            pb.set_position((total - pending.len()) as u64);
            pb.set_message(format!("pass {} of {}", pass + 1, sizes.len()));
        }
    }

    let errors = pending
        .into_iter()
        .map(|row| RowError {
            index: row.index,
            message: row.error.unwrap_or_else(|| {
                "[BatchInsertFailure]: record was not attempted at any granularity".to_string()
            }),
        })
        .collect::<Vec<_>>();

    info!(
        "Funnel complete: {} of {} records inserted, {} diagnosed",
        inserted_count,
        total,
        errors.len()
    );

    FunnelOutcome {
        inserted_count,
        errors,
    }
}

fn index_rows<R>(records: Vec<R>) -> Vec<FailedRow<R>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| FailedRow {
            index,
            record,
            error: None,
        })
        .collect()
}

async fn run_pass<R>(
    rows: Vec<FailedRow<R>>,
    batch_size: usize,
    sink: &dyn BatchSink<R>,
    capture_errors: bool,
) -> (usize, Vec<FailedRow<R>>)
where
    R: Clone + Send + Sync,
{
    let mut inserted_count = 0;
    let mut failed_rows = Vec::new();

    for chunk in rows.chunks(batch_size.max(1)) {
        let records: Vec<R> = chunk.iter().map(|row| row.record.clone()).collect();

        match sink.insert(&records).await {
            Ok(()) => inserted_count += chunk.len(),
            Err(error) => {
                debug!("Chunk of {} failed: {}", chunk.len(), error);
                let message =
                    capture_errors.then(|| format!("[{}]: {}", error.name(), error));
                for row in chunk {
                    failed_rows.push(FailedRow {
                        index: row.index,
                        record: row.record.clone(),
                        error: message.clone(),
                    });
                }
            }
        }
    }

    (inserted_count, failed_rows)
}
