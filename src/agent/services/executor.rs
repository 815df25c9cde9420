//! Retrying executor for a single capability.

use crate::{
    agent::{
        domain::{
            AgentMetrics, AttemptEvent, CapabilityError, ExecutionContext, ExecutionMetadata,
            ExecutionResult, ExecutionState, RetryPolicy,
        },
        ports::{Capability, CapabilityOutput, Delay},
    },
    validation::{Schema, ValidationReport},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info, warn};

/// Wraps one capability with validation, bounded retries and metrics.
///
/// Each executor exclusively owns its [`AgentMetrics`]; they are updated
/// exactly once per [`execute`](Self::execute) call.
pub struct RetryingExecutor<C, D, K>
where
    C: Capability + ?Sized,
    D: Delay,
    K: Clock + Send + Sync,
{
    capability: Arc<C>,
    delay: Arc<D>,
    clock: Arc<K>,
    schema: Schema,
    policy: RetryPolicy,
    metrics: Mutex<AgentMetrics>,
}

/// How a call ended, before it is turned into an [`ExecutionResult`].
enum Settled<O> {
    Output(CapabilityOutput<O>),
    Error(String),
}

impl<C, D, K> RetryingExecutor<C, D, K>
where
    C: Capability + ?Sized,
    D: Delay,
    K: Clock + Send + Sync,
{
    /// Creates an executor with a permissive schema and the default retry
    /// policy.
    #[must_use]
    pub fn new(capability: Arc<C>, delay: Arc<D>, clock: Arc<K>) -> Self {
        Self {
            capability,
            delay,
            clock,
            schema: Schema::permissive(),
            policy: RetryPolicy::default(),
            metrics: Mutex::new(AgentMetrics::default()),
        }
    }

    /// Sets the schema every input must satisfy.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the wrapped capability's identifier.
    #[must_use]
    pub fn capability_id(&self) -> &str {
        self.capability.capability_id()
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the input schema.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates `input` without invoking the capability.
    #[must_use]
    pub fn validate(&self, input: &C::Input) -> ValidationReport {
        self.schema.validate(input)
    }

    /// Returns a snapshot of the running metrics.
    #[must_use]
    pub fn metrics(&self) -> AgentMetrics {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clears the running metrics.
    pub fn reset_metrics(&self) {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
    }

    /// Validates `input`, then calls the capability until it succeeds, fails
    /// permanently, or exhausts the retry budget.
    ///
    /// Never fails: every expected failure is reported in the returned
    /// [`ExecutionResult`], always carrying the last error message.
    pub async fn execute(
        &self,
        input: &C::Input,
        context: Option<&ExecutionContext>,
    ) -> ExecutionResult<C::Output> {
        let started_at = self.clock.utc();
        let capability_id = self.capability.capability_id();

        let report = self.validate(input);
        if !report.is_valid() {
            warn!(
                capability_id,
                errors = %report.summary(),
                "input rejected before execution"
            );
            let state = self.advance(ExecutionState::Validating, AttemptEvent::InputRejected);
            let message = format!("input validation failed: {}", report.summary());
            return self.settle(started_at, state, Settled::Error(message), None);
        }

        let mut state = self.advance(ExecutionState::Validating, AttemptEvent::InputAccepted);
        let mut settled = Settled::Error(String::from("execution ended without an attempt"));
        let mut tokens_used = None;

        while let ExecutionState::Attempting { attempt } = state {
            if let Some(previous) = attempt.checked_sub(1) {
                let backoff = self.policy.backoff_for(previous);
                debug!(
                    capability_id,
                    attempt,
                    backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                    "backing off before retry"
                );
                self.delay.sleep(backoff).await;
            }

            match self.capability.call(input, context).await {
                Ok(output) => {
                    tokens_used = add_tokens(tokens_used, output.tokens_used());
                    settled = Settled::Output(output);
                    state = self.advance(state, AttemptEvent::AttemptSucceeded);
                }
                Err(err) => {
                    tokens_used = add_tokens(tokens_used, err.tokens_used());
                    let class = self.policy.classify(&err);
                    warn!(
                        capability_id,
                        attempt,
                        max_retries = self.policy.max_retries(),
                        failure_class = ?class,
                        error = %err,
                        "capability attempt failed"
                    );
                    settled = Settled::Error(last_error_message(&err));
                    state = self.advance(state, AttemptEvent::AttemptFailed(class));
                }
            }
        }

        self.settle(started_at, state, settled, tokens_used)
    }

    /// Applies a state transition, failing the call on an invalid event.
    fn advance(&self, state: ExecutionState, event: AttemptEvent) -> ExecutionState {
        state
            .transition(event, self.policy.max_retries())
            .unwrap_or_else(|err| {
                error!(capability_id = self.capability.capability_id(), %err, "invalid execution transition");
                ExecutionState::Failed {
                    retry_count: state.retry_count(),
                }
            })
    }

    /// Builds the result for a terminal state and records metrics.
    ///
    /// `tokens_used` covers every attempt, failed ones included.
    fn settle(
        &self,
        started_at: DateTime<Utc>,
        state: ExecutionState,
        settled: Settled<C::Output>,
        tokens_used: Option<u64>,
    ) -> ExecutionResult<C::Output> {
        let finished_at = self.clock.utc();
        let processing_time = (finished_at - started_at).to_std().unwrap_or_default();
        let retry_count = state.retry_count();

        let result = match (state, settled) {
            (ExecutionState::Succeeded { .. }, Settled::Output(output)) => {
                let capability_id = output
                    .model()
                    .unwrap_or_else(|| self.capability.capability_id())
                    .to_owned();
                let metadata = ExecutionMetadata::new(processing_time, retry_count, capability_id)
                    .with_tokens_used(tokens_used);
                ExecutionResult::succeeded(output.into_value(), metadata)
            }
            (_, Settled::Error(message)) => ExecutionResult::failed(
                message,
                ExecutionMetadata::new(
                    processing_time,
                    retry_count,
                    self.capability.capability_id(),
                )
                .with_tokens_used(tokens_used),
            ),
            (_, Settled::Output(_)) => ExecutionResult::failed(
                "capability output discarded after an invalid transition",
                ExecutionMetadata::new(
                    processing_time,
                    retry_count,
                    self.capability.capability_id(),
                )
                .with_tokens_used(tokens_used),
            ),
        };

        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(
                result.is_success(),
                processing_time,
                result.metadata().tokens_used(),
                finished_at,
            );

        if result.is_success() {
            info!(
                capability_id = result.metadata().capability_id(),
                retry_count,
                processing_ms = u64::try_from(processing_time.as_millis()).unwrap_or(u64::MAX),
                "execution succeeded"
            );
        } else {
            warn!(
                capability_id = result.metadata().capability_id(),
                retry_count,
                error = result.error().unwrap_or_default(),
                "execution failed"
            );
        }

        result
    }
}

const fn add_tokens(total: Option<u64>, reported: Option<u64>) -> Option<u64> {
    match (total, reported) {
        (Some(sum), Some(tokens)) => Some(sum.saturating_add(tokens)),
        (Some(sum), None) => Some(sum),
        (None, other) => other,
    }
}

fn last_error_message(err: &CapabilityError) -> String {
    let message = err.message().trim();
    if message.is_empty() {
        String::from("capability failed without a message")
    } else {
        message.to_owned()
    }
}
