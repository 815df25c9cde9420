//! Unit tests for batch orchestration.

use super::support::{ConcurrencyTracker, ScriptedCapability, Step};
use crate::agent::{
    adapters::memory::RecordingDelay,
    domain::{BatchPolicy, RetryPolicy},
    ports::{BatchProgress, Capability, ProgressError, ProgressResult},
    services::{BatchItem, BatchOrchestrator, RetryingExecutor},
};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn orchestrator<C>(
    capability: Arc<C>,
    delay: &RecordingDelay,
    retry: RetryPolicy,
) -> BatchOrchestrator<C, RecordingDelay, DefaultClock>
where
    C: Capability<Input = Value>,
{
    let shared_delay = Arc::new(delay.clone());
    let executor =
        RetryingExecutor::new(capability, Arc::clone(&shared_delay), Arc::new(DefaultClock))
            .with_policy(retry);
    BatchOrchestrator::new(Arc::new(executor), shared_delay, BatchPolicy::default())
}

fn sleeping_items(count: u64, sleep_ms: u64) -> Vec<BatchItem<String, Value>> {
    (1..=count)
        .map(|id| BatchItem::new(format!("paper-{id}"), json!({ "id": id, "sleep_ms": sleep_ms })))
        .collect()
}

#[rstest]
#[tokio::test]
async fn empty_batch_returns_immediately() {
    let capability = Arc::new(ScriptedCapability::always(Step::ok("unused")));
    let delay = RecordingDelay::new();
    let batch = orchestrator(Arc::clone(&capability), &delay, RetryPolicy::new(0));

    let outcome = batch.execute_batch::<String>(&[], None, None).await;

    assert!(outcome.is_empty());
    assert_eq!(capability.calls(), 0);
    assert!(delay.requested().is_empty());
    assert_eq!(batch.executor().metrics().total_executions(), 0);
}

#[rstest]
#[tokio::test]
async fn one_failing_item_does_not_affect_siblings() {
    let tracker = Arc::new(ConcurrencyTracker::new([3]));
    let delay = RecordingDelay::new();
    let batch = orchestrator(tracker, &delay, RetryPolicy::new(1));

    let outcome = batch.execute_batch(&sleeping_items(5, 1), None, None).await;

    assert_eq!(outcome.len(), 5);
    for (key, result) in outcome.iter() {
        assert_eq!(result.is_success(), key != "paper-3", "unexpected result for {key}");
    }
    let failed = outcome.get(&"paper-3".to_owned()).expect("item 3 present");
    assert_eq!(failed.error(), Some("item 3 exploded"));
    assert_eq!(failed.metadata().retry_count(), 1);
    assert_eq!((outcome.succeeded_count(), outcome.failed_count()), (4, 1));
}

#[rstest]
#[tokio::test]
async fn chunks_cap_concurrency_and_pause_between_chunks() {
    let tracker = Arc::new(ConcurrencyTracker::new([]));
    let delay = RecordingDelay::new();
    let batch = orchestrator(Arc::clone(&tracker), &delay, RetryPolicy::new(0));

    let outcome = batch.execute_batch(&sleeping_items(7, 20), None, None).await;

    assert_eq!(outcome.succeeded_count(), 7);
    assert_eq!(tracker.calls(), 7);
    assert!(tracker.peak() <= 3, "peak concurrency was {}", tracker.peak());
    assert!(tracker.peak() > 1, "chunk items must run concurrently");
    assert_eq!(delay.requested(), vec![Duration::from_secs(1); 2]);
}

#[rstest]
#[tokio::test]
async fn outcome_preserves_input_order_not_completion_order() {
    let tracker = Arc::new(ConcurrencyTracker::new([]));
    let delay = RecordingDelay::new();
    let batch = orchestrator(tracker, &delay, RetryPolicy::new(0));
    let items: Vec<_> = [(1_u64, 30_u64), (2, 20), (3, 1)]
        .into_iter()
        .map(|(id, sleep_ms)| {
            BatchItem::new(id, json!({ "id": id, "sleep_ms": sleep_ms }))
        })
        .collect();

    let outcome = batch.execute_batch(&items, None, None).await;

    assert_eq!(outcome.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    let values: Vec<_> = outcome
        .into_entries()
        .into_iter()
        .filter_map(|(_, result)| result.into_result().ok())
        .collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[rstest]
#[tokio::test]
async fn progress_is_reported_after_every_item() {
    let tracker = Arc::new(ConcurrencyTracker::new([]));
    let delay = RecordingDelay::new();
    let batch = orchestrator(tracker, &delay, RetryPolicy::new(0));
    let seen = Mutex::new(Vec::new());
    let reporter = |progress: BatchProgress| -> ProgressResult {
        seen.lock()
            .expect("progress lock")
            .push((progress.completed(), progress.total()));
        Ok(())
    };

    batch
        .execute_batch(&sleeping_items(7, 1), None, Some(&reporter))
        .await;

    let updates = seen.into_inner().expect("progress lock");
    let expected: Vec<_> = (1..=7).map(|done| (done, 7)).collect();
    assert_eq!(updates, expected);
}

#[rstest]
#[tokio::test]
async fn failing_progress_reporter_does_not_abort_the_batch() {
    let capability = Arc::new(ScriptedCapability::always(Step::ok("done")));
    let delay = RecordingDelay::new();
    let batch = orchestrator(Arc::clone(&capability), &delay, RetryPolicy::new(0));
    let reporter =
        |_: BatchProgress| -> ProgressResult { Err(ProgressError::new("renderer went away")) };
    let items = vec![
        BatchItem::new("a", json!({})),
        BatchItem::new("b", json!({})),
        BatchItem::new("c", json!({})),
        BatchItem::new("d", json!({})),
    ];

    let outcome = batch.execute_batch(&items, None, Some(&reporter)).await;

    assert_eq!(outcome.succeeded_count(), 4);
    assert_eq!(capability.calls(), 4);
}

#[rstest]
#[tokio::test]
async fn duplicate_keys_keep_first_position_and_last_result() {
    let capability = Arc::new(ScriptedCapability::new([
        Step::ok("first"),
        Step::ok("second"),
        Step::ok("third"),
    ]));
    let delay = RecordingDelay::new();
    let batch = orchestrator(capability, &delay, RetryPolicy::new(0));
    let items = vec![
        BatchItem::new("dup", json!({})),
        BatchItem::new("other", json!({})),
    ];
    let again = vec![BatchItem::new("dup", json!({})), BatchItem::new("dup", json!({}))];

    let outcome = batch.execute_batch(&items, None, None).await;
    let repeated = batch.execute_batch(&again, None, None).await;

    assert_eq!(outcome.keys().copied().collect::<Vec<_>>(), vec!["dup", "other"]);
    assert_eq!(repeated.len(), 1);
    assert_eq!(
        repeated.get(&"dup").and_then(|result| result.data()).map(String::as_str),
        Some("third")
    );
}

#[rstest]
#[tokio::test]
async fn large_batches_index_every_key_in_input_order() {
    let capability = Arc::new(ScriptedCapability::always(Step::ok("done")));
    let delay = RecordingDelay::new();
    let batch = orchestrator(Arc::clone(&capability), &delay, RetryPolicy::new(0));
    let items: Vec<_> = (0..250_u64)
        .map(|id| BatchItem::new(format!("paper-{id}"), json!({ "id": id })))
        .collect();

    let outcome = batch.execute_batch(&items, None, None).await;

    assert_eq!(outcome.len(), 250);
    assert_eq!(capability.calls(), 250);
    assert!(
        outcome
            .keys()
            .zip(items.iter().map(BatchItem::key))
            .all(|(actual, expected)| actual == expected)
    );
    assert!(items.iter().all(|item| {
        outcome
            .get(item.key())
            .and_then(|result| result.data())
            .is_some_and(|data| data == "done")
    }));
    assert!(outcome.get(&"paper-250".to_owned()).is_none());
}
