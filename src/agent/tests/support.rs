//! Fakes shared by the agent execution tests.

use crate::agent::{
    domain::{CapabilityError, ExecutionContext},
    ports::{Capability, CapabilityOutput, CapabilityResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid start time");
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += chrono::Duration::from_std(by).expect("duration in range");
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// One scripted response.
#[derive(Debug, Clone)]
pub struct Step {
    result: Result<String, CapabilityError>,
    latency: Duration,
    tokens_used: Option<u64>,
}

impl Step {
    pub fn ok(value: &str) -> Self {
        Self {
            result: Ok(value.to_owned()),
            latency: Duration::ZERO,
            tokens_used: None,
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            result: Err(CapabilityError::new(message)),
            latency: Duration::ZERO,
            tokens_used: None,
        }
    }

    pub fn permanent(message: &str) -> Self {
        Self {
            result: Err(CapabilityError::permanent(message)),
            latency: Duration::ZERO,
            tokens_used: None,
        }
    }

    pub const fn taking(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub const fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens_used = Some(tokens);
        self
    }
}

/// Capability that replays a script; the last step repeats forever.
pub struct ScriptedCapability {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
    clock: Option<Arc<ManualClock>>,
    seen_callers: Mutex<Vec<Option<String>>>,
}

impl ScriptedCapability {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: AtomicUsize::new(0),
            clock: None,
            seen_callers: Mutex::new(Vec::new()),
        }
    }

    pub fn always(step: Step) -> Self {
        Self::new([step])
    }

    pub fn on_clock(mut self, clock: Arc<ManualClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_callers(&self) -> Vec<Option<String>> {
        self.seen_callers.lock().expect("callers lock").clone()
    }

    fn next_step(&self) -> Step {
        let mut steps = self.steps.lock().expect("script lock");
        if steps.len() > 1 {
            steps.pop_front().expect("non-empty script")
        } else {
            steps.front().cloned().expect("script must not be empty")
        }
    }
}

#[async_trait]
impl Capability for ScriptedCapability {
    type Input = Value;
    type Output = String;

    fn capability_id(&self) -> &str {
        "scripted"
    }

    async fn call(
        &self,
        _input: &Value,
        context: Option<&ExecutionContext>,
    ) -> CapabilityResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_callers
            .lock()
            .expect("callers lock")
            .push(context.and_then(ExecutionContext::caller_id).map(ToOwned::to_owned));
        let step = self.next_step();
        if let Some(clock) = &self.clock {
            clock.advance(step.latency);
        }
        match (step.result, step.tokens_used) {
            (Ok(value), Some(tokens)) => Ok(CapabilityOutput::new(value).with_tokens_used(tokens)),
            (Ok(value), None) => Ok(CapabilityOutput::new(value)),
            (Err(err), Some(tokens)) => Err(err.with_tokens_used(tokens)),
            (Err(err), None) => Err(err),
        }
    }
}

/// Capability that sleeps for real and records peak concurrency.
///
/// Inputs are `{"id": n, "sleep_ms": m}`; the ids listed in `failing` fail
/// with a transient error.
pub struct ConcurrencyTracker {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
    failing: Vec<u64>,
}

impl ConcurrencyTracker {
    pub fn new(failing: impl IntoIterator<Item = u64>) -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            failing: failing.into_iter().collect(),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Capability for ConcurrencyTracker {
    type Input = Value;
    type Output = u64;

    fn capability_id(&self) -> &str {
        "tracker"
    }

    async fn call(
        &self,
        input: &Value,
        _context: Option<&ExecutionContext>,
    ) -> CapabilityResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let sleep_ms = input.get("sleep_ms").and_then(Value::as_u64).unwrap_or(10);
        tokio::time::sleep(Duration::from_millis(sleep_ms)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let id = input.get("id").and_then(Value::as_u64).unwrap_or_default();
        if self.failing.contains(&id) {
            return Err(CapabilityError::new(format!("item {id} exploded")));
        }
        Ok(CapabilityOutput::new(id))
    }
}
