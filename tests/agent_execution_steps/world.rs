//! Shared world state for agent execution BDD scenarios.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use lectern::agent::{
    adapters::{FnCapability, memory::RecordingDelay},
    domain::{AgentDescriptor, CapabilityError, ExecutionResult, RetryPolicy},
    ports::{BatchProgress, CapabilityOutput, CapabilityResult},
    services::{AgentRegistry, BatchItem, BatchOutcome, DynCapability, RetryingExecutor},
};
use lectern::validation::Schema;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;

/// Executor type used by the BDD world.
pub type TestExecutor = RetryingExecutor<DynCapability<Value, String>, RecordingDelay, DefaultClock>;

/// One scripted capability reply.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Succeed with the given output.
    Succeed(String),
    /// Fail with the given message.
    Fail(String),
}

/// Replies handed out in order; the last one repeats.
#[derive(Debug, Default)]
pub struct Script {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl Script {
    /// Queues `reply` `times` times.
    pub fn push(&self, reply: &Reply, times: usize) {
        let mut replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
        replies.extend(std::iter::repeat_n(reply.clone(), times));
    }

    /// Returns how often the capability was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, input: &Value) -> CapabilityResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if input.get("fail").and_then(Value::as_bool) == Some(true) {
            return Err(CapabilityError::new("paper could not be analysed"));
        }
        let mut replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };
        match reply {
            Some(Reply::Succeed(output)) => Ok(CapabilityOutput::new(output)),
            Some(Reply::Fail(message)) => Err(CapabilityError::new(message)),
            None => Ok(CapabilityOutput::new("analysed".to_owned())),
        }
    }
}

/// Builds a capability that answers from `script`.
#[must_use]
pub fn scripted(script: &Arc<Script>) -> Arc<DynCapability<Value, String>> {
    let shared = Arc::clone(script);
    Arc::new(FnCapability::new(
        "scripted",
        move |input: Value, _context| {
            let answer = shared.answer(&input);
            async move { answer }
        },
    ))
}

/// Scenario world for agent execution behaviour tests.
pub struct ExecutionWorld {
    /// Replies of the capability under test.
    pub script: Arc<Script>,
    /// Delays requested by the executor.
    pub retry_delay: Arc<RecordingDelay>,
    /// Delays requested by the batch orchestrator.
    pub batch_delay: Arc<RecordingDelay>,
    /// Input schema for the executor.
    pub schema: Schema,
    /// Retry policy for the executor.
    pub policy: RetryPolicy,
    /// Result of the last single execution.
    pub last_result: Option<ExecutionResult<String>>,
    /// Items queued for the next batch.
    pub batch_items: Vec<BatchItem<String, Value>>,
    /// Outcome of the last batch.
    pub batch_outcome: Option<BatchOutcome<String, String>>,
    /// Progress updates received during the last batch.
    pub progress: Arc<Mutex<Vec<BatchProgress>>>,
    /// Registry under test.
    pub registry: AgentRegistry<Value, String>,
    /// Descriptor of the last resolved agent.
    pub resolved: Option<AgentDescriptor>,
}

impl ExecutionWorld {
    /// Creates a world with a permissive schema and default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: Arc::new(Script::default()),
            retry_delay: Arc::new(RecordingDelay::new()),
            batch_delay: Arc::new(RecordingDelay::new()),
            schema: Schema::permissive(),
            policy: RetryPolicy::default(),
            last_result: None,
            batch_items: Vec::new(),
            batch_outcome: None,
            progress: Arc::new(Mutex::new(Vec::new())),
            registry: AgentRegistry::new(),
            resolved: None,
        }
    }

    /// Builds an executor over the scripted capability.
    #[must_use]
    pub fn executor(&self) -> TestExecutor {
        RetryingExecutor::new(
            scripted(&self.script),
            Arc::clone(&self.retry_delay),
            Arc::new(DefaultClock),
        )
        .with_schema(self.schema.clone())
        .with_policy(self.policy.clone())
    }
}

impl Default for ExecutionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ExecutionWorld {
    ExecutionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
