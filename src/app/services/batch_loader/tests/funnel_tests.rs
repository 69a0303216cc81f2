//! Tests for batched insertion and funnel convergence

use super::{RejectNegativesSink, records_with_poison};
use crate::app::services::batch_loader::{funnel, insert_batched};

#[tokio::test]
async fn test_insert_batched_all_good() {
    let sink = RejectNegativesSink::new();
    let outcome = insert_batched(records_with_poison(25, &[]), 10, &sink).await;

    assert_eq!(outcome.inserted_count, 25);
    assert!(outcome.failed_rows.is_empty());
    // 25 records in chunks of 10 means 3 insert calls
    assert_eq!(sink.insert_calls(), 3);
}

#[tokio::test]
async fn test_insert_batched_fails_whole_chunk() {
    let sink = RejectNegativesSink::new();
    let outcome = insert_batched(records_with_poison(25, &[12]), 10, &sink).await;

    // One bad record poisons its chunk of 10; the other chunks insert
    assert_eq!(outcome.inserted_count, 15);
    assert_eq!(outcome.failed_rows.len(), 10);
    let failed_indices: Vec<usize> = outcome.failed_rows.iter().map(|r| r.index).collect();
    assert_eq!(failed_indices, (10..20).collect::<Vec<usize>>());

    // The storage error is swallowed at this granularity
    assert!(outcome.failed_rows.iter().all(|r| r.error.is_none()));
}

#[tokio::test]
async fn test_insert_batched_at_granularity_one_captures_errors() {
    let sink = RejectNegativesSink::new();
    let outcome = insert_batched(records_with_poison(3, &[1]), 1, &sink).await;

    assert_eq!(outcome.inserted_count, 2);
    assert_eq!(outcome.failed_rows.len(), 1);
    let failure = &outcome.failed_rows[0];
    assert_eq!(failure.index, 1);
    let message = failure.error.as_deref().unwrap();
    assert!(message.starts_with("[StorageError]:"), "got '{}'", message);
    assert!(message.contains("negative value"));
}

#[tokio::test]
async fn test_funnel_converges_regardless_of_distribution() {
    // Malformed rows scattered across chunks, clustered, and at the edges
    let poison_patterns: &[&[usize]] = &[
        &[0],
        &[249],
        &[3, 57, 111, 198, 240],
        &[10, 11, 12, 13, 14, 15, 16],
        &[],
    ];

    for poisoned in poison_patterns {
        let sink = RejectNegativesSink::new();
        let records = records_with_poison(250, poisoned);
        let outcome = funnel(&[100, 10, 1], records, &sink, None).await;

        assert_eq!(
            outcome.inserted_count,
            250 - poisoned.len(),
            "poison pattern {:?}",
            poisoned
        );
        assert_eq!(outcome.errors.len(), poisoned.len());

        let mut diagnosed: Vec<usize> = outcome.errors.iter().map(|e| e.index).collect();
        diagnosed.sort();
        assert_eq!(&diagnosed, poisoned);
    }
}

#[tokio::test]
async fn test_funnel_diagnoses_each_failure_individually() {
    let sink = RejectNegativesSink::new();
    let outcome = funnel(&[10, 1], records_with_poison(30, &[7, 22]), &sink, None).await;

    assert_eq!(outcome.inserted_count, 28);
    assert_eq!(outcome.errors.len(), 2);
    for error in &outcome.errors {
        assert!(
            error.message.starts_with("[StorageError]:"),
            "got '{}'",
            error.message
        );
        assert!(error.message.contains("negative value"));
    }
}

#[tokio::test]
async fn test_funnel_total_failure_degenerates_to_diagnostics() {
    let sink = RejectNegativesSink::new();
    let poisoned: Vec<usize> = (0..20).collect();
    let outcome = funnel(&[10, 1], records_with_poison(20, &poisoned), &sink, None).await;

    assert_eq!(outcome.inserted_count, 0);
    assert_eq!(outcome.errors.len(), 20);
}

#[tokio::test]
async fn test_funnel_finest_size_above_one_reports_chunk_members() {
    let sink = RejectNegativesSink::new();
    let outcome = funnel(&[10, 2], records_with_poison(20, &[5]), &sink, None).await;

    // At finest size 2 the bad record drags its chunk partner down with it;
    // both carry the chunk's error message
    assert_eq!(outcome.inserted_count, 18);
    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.errors.iter().any(|e| e.index == 5));
    assert!(
        outcome
            .errors
            .iter()
            .all(|e| e.message.contains("negative value"))
    );
}

#[tokio::test]
async fn test_funnel_skips_remaining_passes_when_clean() {
    let sink = RejectNegativesSink::new();
    let outcome = funnel(&[100, 10, 1], records_with_poison(50, &[]), &sink, None).await;

    assert_eq!(outcome.inserted_count, 50);
    assert!(outcome.errors.is_empty());
    // One pass of one chunk was enough; the finer passes never ran
    assert_eq!(sink.insert_calls(), 1);
}

#[tokio::test]
async fn test_funnel_with_empty_records() {
    let sink = RejectNegativesSink::new();
    let outcome = funnel(&[100, 10, 1], Vec::new(), &sink, None).await;

    assert_eq!(outcome.inserted_count, 0);
    assert!(outcome.errors.is_empty());
    assert_eq!(sink.insert_calls(), 0);
}
