//! Running execution counters owned by one executor.

use super::millis;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Running counters for one executor instance.
///
/// Updated exactly once per call, success or failure, and never reset
/// except on explicit request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMetrics {
    total_executions: u64,
    successful_executions: u64,
    failed_executions: u64,
    #[serde(rename = "averageExecutionTimeMs", serialize_with = "millis::serialize")]
    average_execution_time: Duration,
    total_tokens_used: u64,
    last_executed_at: Option<DateTime<Utc>>,
}

impl AgentMetrics {
    /// Records one finished execution.
    ///
    /// The average latency is updated incrementally as
    /// `(old_avg * (n - 1) + latency) / n`, where `n` counts this execution.
    pub fn record(
        &mut self,
        succeeded: bool,
        latency: Duration,
        tokens_used: Option<u64>,
        executed_at: DateTime<Utc>,
    ) {
        self.total_executions = self.total_executions.saturating_add(1);
        if succeeded {
            self.successful_executions = self.successful_executions.saturating_add(1);
        } else {
            self.failed_executions = self.failed_executions.saturating_add(1);
        }

        let count = u32::try_from(self.total_executions).unwrap_or(u32::MAX);
        let previous_total = self
            .average_execution_time
            .saturating_mul(count.saturating_sub(1));
        self.average_execution_time = previous_total.saturating_add(latency) / count;

        self.total_tokens_used = self
            .total_tokens_used
            .saturating_add(tokens_used.unwrap_or(0));
        self.last_executed_at = Some(executed_at);
    }

    /// Clears all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the number of recorded executions.
    #[must_use]
    pub const fn total_executions(&self) -> u64 {
        self.total_executions
    }

    /// Returns the number of successful executions.
    #[must_use]
    pub const fn successful_executions(&self) -> u64 {
        self.successful_executions
    }

    /// Returns the number of failed executions.
    #[must_use]
    pub const fn failed_executions(&self) -> u64 {
        self.failed_executions
    }

    /// Returns the running mean latency.
    #[must_use]
    pub const fn average_execution_time(&self) -> Duration {
        self.average_execution_time
    }

    /// Returns the cumulative token count reported by the capability.
    #[must_use]
    pub const fn total_tokens_used(&self) -> u64 {
        self.total_tokens_used
    }

    /// Returns when the last execution finished.
    #[must_use]
    pub const fn last_executed_at(&self) -> Option<DateTime<Utc>> {
        self.last_executed_at
    }

    /// Returns the fraction of successful executions, or `None` before the
    /// first execution.
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "success rate is a reporting ratio, not an accounting value"
    )]
    #[must_use]
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_executions == 0 {
            return None;
        }
        Some(self.successful_executions as f64 / self.total_executions as f64)
    }
}
