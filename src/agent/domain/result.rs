//! Tagged outcome of one execution.

use super::millis;
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// Bookkeeping attached to every [`ExecutionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionMetadata {
    #[serde(rename = "processingTimeMs", with = "millis")]
    processing_time: Duration,
    retry_count: u32,
    capability_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tokens_used: Option<u64>,
}

impl ExecutionMetadata {
    /// Creates metadata for a finished execution.
    #[must_use]
    pub fn new(processing_time: Duration, retry_count: u32, capability_id: impl Into<String>) -> Self {
        Self {
            processing_time,
            retry_count,
            capability_id: capability_id.into(),
            tokens_used: None,
        }
    }

    /// Sets the token (or cost unit) count reported by the capability.
    #[must_use]
    pub const fn with_tokens_used(mut self, tokens_used: Option<u64>) -> Self {
        self.tokens_used = tokens_used;
        self
    }

    /// Returns the wall-clock time spent in the call, including backoff.
    #[must_use]
    pub const fn processing_time(&self) -> Duration {
        self.processing_time
    }

    /// Returns the number of retries performed after the first attempt.
    #[must_use]
    pub const fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Returns the capability or model identifier.
    #[must_use]
    pub fn capability_id(&self) -> &str {
        &self.capability_id
    }

    /// Returns the token count, when the capability reported one.
    #[must_use]
    pub const fn tokens_used(&self) -> Option<u64> {
        self.tokens_used
    }
}

/// Either the payload of a successful execution or the surfaced error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome<T> {
    /// The capability produced a payload.
    Succeeded(T),
    /// Validation, a permanent failure, or retry exhaustion ended the call.
    Failed(String),
}

/// Result of one execution: exactly one of payload or error, plus metadata.
///
/// Serializes as `{"success", "data"?, "error"?, "metadata"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult<T> {
    outcome: ExecutionOutcome<T>,
    metadata: ExecutionMetadata,
}

impl<T> ExecutionResult<T> {
    /// Creates a successful result.
    #[must_use]
    pub const fn succeeded(data: T, metadata: ExecutionMetadata) -> Self {
        Self {
            outcome: ExecutionOutcome::Succeeded(data),
            metadata,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failed(error: impl Into<String>, metadata: ExecutionMetadata) -> Self {
        Self {
            outcome: ExecutionOutcome::Failed(error.into()),
            metadata,
        }
    }

    /// Returns `true` for a successful execution.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::Succeeded(_))
    }

    /// Returns the payload of a successful execution.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match &self.outcome {
            ExecutionOutcome::Succeeded(data) => Some(data),
            ExecutionOutcome::Failed(_) => None,
        }
    }

    /// Returns the error message of a failed execution.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ExecutionOutcome::Succeeded(_) => None,
            ExecutionOutcome::Failed(message) => Some(message),
        }
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &ExecutionOutcome<T> {
        &self.outcome
    }

    /// Returns the execution metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ExecutionMetadata {
        &self.metadata
    }

    /// Converts into a standard result, discarding metadata.
    ///
    /// # Errors
    ///
    /// Returns the surfaced error message for a failed execution.
    pub fn into_result(self) -> Result<T, String> {
        match self.outcome {
            ExecutionOutcome::Succeeded(data) => Ok(data),
            ExecutionOutcome::Failed(message) => Err(message),
        }
    }
}

#[derive(Serialize)]
struct ResultWire<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    metadata: &'a ExecutionMetadata,
}

impl<T: Serialize> Serialize for ExecutionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResultWire {
            success: self.is_success(),
            data: self.data(),
            error: self.error(),
            metadata: &self.metadata,
        }
        .serialize(serializer)
    }
}
