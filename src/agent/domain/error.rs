//! Error types for agent domain values and capability calls.

use super::{AttemptEvent, ExecutionState};
use std::time::Duration;
use thiserror::Error;

/// Errors returned while constructing agent domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentDomainError {
    /// The agent name is empty after trimming.
    #[error("agent name must not be empty")]
    EmptyAgentName,

    /// The agent name contains characters outside `[a-z0-9_-]`.
    #[error(
        "agent name '{0}' contains invalid characters (only lowercase alphanumeric, hyphens and underscores allowed)"
    )]
    InvalidAgentName(String),

    /// The agent name exceeds the 100-character limit.
    #[error("agent name exceeds 100 character limit: {0}")]
    AgentNameTooLong(String),

    /// The agent version is empty after trimming.
    #[error("agent version must not be empty")]
    EmptyVersion,

    /// The agent version contains whitespace or the `:` key separator.
    #[error("agent version '{0}' must not contain whitespace or ':'")]
    InvalidVersion(String),
}

/// Errors returned while constructing execution policies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Batches must contain at least one item per chunk.
    #[error("batch chunk size must be at least 1")]
    ZeroChunkSize,
}

/// Failure of a single capability call.
///
/// The message is always surfaced to the caller. Whether the failure is
/// retried is decided by [`RetryPolicy::classify`](super::RetryPolicy::classify),
/// unless the capability marked it permanent explicitly. A failed call can
/// still report the tokens it consumed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CapabilityError {
    message: String,
    permanent: bool,
    tokens_used: Option<u64>,
}

impl CapabilityError {
    /// Creates a failure classified by its message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            permanent: false,
            tokens_used: None,
        }
    }

    /// Creates a failure that is never retried.
    #[must_use]
    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            permanent: true,
            tokens_used: None,
        }
    }

    /// Creates the failure reported when a call exceeds its time limit.
    #[must_use]
    pub fn timeout(limit: Duration) -> Self {
        Self::new(format!(
            "capability call timed out after {}ms",
            limit.as_millis()
        ))
    }

    /// Records tokens the failed call still consumed.
    #[must_use]
    pub const fn with_tokens_used(mut self, tokens_used: u64) -> Self {
        self.tokens_used = Some(tokens_used);
        self
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` when the capability marked this failure permanent.
    #[must_use]
    pub const fn is_marked_permanent(&self) -> bool {
        self.permanent
    }

    /// Returns the tokens consumed by the failed call, when reported.
    #[must_use]
    pub const fn tokens_used(&self) -> Option<u64> {
        self.tokens_used
    }
}

/// An event that is not valid in the current execution state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("event {event:?} is not valid in state {from:?}")]
pub struct InvalidTransition {
    /// State the event was applied to.
    pub from: ExecutionState,
    /// Rejected event.
    pub event: AttemptEvent,
}
