//! Capability port: one unit of externally provided work.

use crate::agent::domain::{CapabilityError, ExecutionContext};
use async_trait::async_trait;
use serde::Serialize;

/// Result type for capability calls.
pub type CapabilityResult<O> = Result<CapabilityOutput<O>, CapabilityError>;

/// Payload produced by a capability, with optional usage accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityOutput<O> {
    value: O,
    tokens_used: Option<u64>,
    model: Option<String>,
}

impl<O> CapabilityOutput<O> {
    /// Wraps a payload without usage information.
    #[must_use]
    pub const fn new(value: O) -> Self {
        Self {
            value,
            tokens_used: None,
            model: None,
        }
    }

    /// Records the tokens (or other cost units) consumed by the call.
    #[must_use]
    pub const fn with_tokens_used(mut self, tokens_used: u64) -> Self {
        self.tokens_used = Some(tokens_used);
        self
    }

    /// Records the concrete model that served the call.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Returns the payload.
    #[must_use]
    pub const fn value(&self) -> &O {
        &self.value
    }

    /// Returns the reported token count.
    #[must_use]
    pub const fn tokens_used(&self) -> Option<u64> {
        self.tokens_used
    }

    /// Returns the reported model identifier.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Consumes the output and returns the payload.
    #[must_use]
    pub fn into_value(self) -> O {
        self.value
    }
}

/// A capability wrapped by the retrying executor.
///
/// Implementations perform exactly one underlying request per call and
/// enforce their own timeout; the executor adds retries, backoff and
/// metrics around them.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Structured input; validated against a schema before any call.
    type Input: Serialize + Send + Sync;
    /// Payload produced on success.
    type Output: Send;

    /// Returns the identifier reported in execution metadata.
    fn capability_id(&self) -> &str;

    /// Performs one call.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] when the underlying request fails. The
    /// executor decides from the error whether to retry.
    async fn call(
        &self,
        input: &Self::Input,
        context: Option<&ExecutionContext>,
    ) -> CapabilityResult<Self::Output>;
}
