//! Batch orchestration over a retrying executor.

use super::RetryingExecutor;
use crate::agent::{
    domain::{BatchPolicy, ExecutionContext, ExecutionResult},
    ports::{BatchProgress, Capability, Delay, ProgressReporter},
};
use futures::future::join_all;
use mockable::Clock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// One keyed input of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem<K, I> {
    key: K,
    input: I,
}

impl<K, I> BatchItem<K, I> {
    /// Creates a batch item.
    #[must_use]
    pub const fn new(key: K, input: I) -> Self {
        Self { key, input }
    }

    /// Returns the item key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the item input.
    #[must_use]
    pub const fn input(&self) -> &I {
        &self.input
    }
}

/// Per-item results of a batch, in input order.
///
/// A key that appears more than once keeps its first position and the
/// result of its last occurrence.
#[derive(Debug, Clone)]
pub struct BatchOutcome<K, T> {
    entries: Vec<(K, ExecutionResult<T>)>,
    positions: HashMap<K, usize>,
}

impl<K: Eq + Hash, T: PartialEq> PartialEq for BatchOutcome<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash, T: Eq> Eq for BatchOutcome<K, T> {}

impl<K: Clone + Eq + Hash, T> BatchOutcome<K, T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    fn insert(&mut self, key: K, result: ExecutionResult<T>) {
        if let Some(entry) = self
            .positions
            .get(&key)
            .and_then(|&position| self.entries.get_mut(position))
        {
            entry.1 = result;
            return;
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, result));
    }

    /// Returns the result recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&ExecutionResult<T>> {
        self.positions
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, result)| result)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the batch had no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, result)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &ExecutionResult<T>)> {
        self.entries.iter().map(|(key, result)| (key, result))
    }

    /// Returns the keys in input order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Returns the number of successful items.
    #[must_use]
    pub fn succeeded_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, result)| result.is_success())
            .count()
    }

    /// Returns the number of failed items.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.len().saturating_sub(self.succeeded_count())
    }

    /// Consumes the outcome and returns its entries in input order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, ExecutionResult<T>)> {
        self.entries
    }
}

/// Fans batch items out to a [`RetryingExecutor`].
///
/// Items are dispatched in chunks of [`BatchPolicy::chunk_size`]; every item
/// in a chunk runs concurrently and the next chunk starts only after the
/// whole chunk has settled and the inter-batch delay has elapsed.
pub struct BatchOrchestrator<C, D, K>
where
    C: Capability + ?Sized,
    D: Delay,
    K: Clock + Send + Sync,
{
    executor: Arc<RetryingExecutor<C, D, K>>,
    delay: Arc<D>,
    policy: BatchPolicy,
}

impl<C, D, K> BatchOrchestrator<C, D, K>
where
    C: Capability + ?Sized,
    D: Delay,
    K: Clock + Send + Sync,
{
    /// Creates an orchestrator over `executor`.
    #[must_use]
    pub const fn new(
        executor: Arc<RetryingExecutor<C, D, K>>,
        delay: Arc<D>,
        policy: BatchPolicy,
    ) -> Self {
        Self {
            executor,
            delay,
            policy,
        }
    }

    /// Returns the wrapped executor.
    #[must_use]
    pub const fn executor(&self) -> &Arc<RetryingExecutor<C, D, K>> {
        &self.executor
    }

    /// Returns the batch policy.
    #[must_use]
    pub const fn policy(&self) -> &BatchPolicy {
        &self.policy
    }

    /// Executes every item and collects one result per key.
    ///
    /// One item's failure never affects its siblings. `progress` is told
    /// about each completed item; its failures are logged and ignored. An
    /// empty batch returns immediately without touching the executor.
    pub async fn execute_batch<Key>(
        &self,
        items: &[BatchItem<Key, C::Input>],
        context: Option<&ExecutionContext>,
        progress: Option<&dyn ProgressReporter>,
    ) -> BatchOutcome<Key, C::Output>
    where
        Key: Clone + Eq + Hash,
    {
        let total = items.len();
        let mut outcome = BatchOutcome::with_capacity(total);
        if items.is_empty() {
            return outcome;
        }

        let chunk_size = self.policy.chunk_size().get();
        let chunk_count = total.div_ceil(chunk_size);
        let completed = AtomicUsize::new(0);
        info!(
            capability_id = self.executor.capability_id(),
            total,
            chunk_size,
            chunk_count,
            "starting batch"
        );

        for (chunk_index, chunk) in items.chunks(chunk_size).enumerate() {
            if chunk_index > 0 {
                debug!(
                    chunk = chunk_index,
                    delay_ms = u64::try_from(self.policy.inter_batch_delay().as_millis())
                        .unwrap_or(u64::MAX),
                    "pausing between chunks"
                );
                self.delay.sleep(self.policy.inter_batch_delay()).await;
            }

            let results = join_all(
                chunk
                    .iter()
                    .map(|item| self.run_item(item, context, &completed, total, progress)),
            )
            .await;

            for (item, result) in chunk.iter().zip(results) {
                outcome.insert(item.key().clone(), result);
            }
        }

        info!(
            capability_id = self.executor.capability_id(),
            succeeded = outcome.succeeded_count(),
            failed = outcome.failed_count(),
            "batch finished"
        );
        outcome
    }

    async fn run_item<Key>(
        &self,
        item: &BatchItem<Key, C::Input>,
        context: Option<&ExecutionContext>,
        completed: &AtomicUsize,
        total: usize,
        progress: Option<&dyn ProgressReporter>,
    ) -> ExecutionResult<C::Output> {
        let result = self.executor.execute(item.input(), context).await;
        let done = completed.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        if let Some(reporter) = progress
            && let Err(err) = reporter.report(BatchProgress::new(done, total))
        {
            warn!(completed = done, total, %err, "progress reporter failed; continuing batch");
        }
        result
    }
}
