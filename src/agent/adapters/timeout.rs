//! Time-limit decorator for capabilities.

use crate::agent::{
    domain::{CapabilityError, ExecutionContext},
    ports::{Capability, CapabilityResult},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Fails a wrapped capability call that exceeds `limit`.
///
/// The failure is reported as a transient [`CapabilityError`], so the
/// executor retries it like any other recoverable error.
#[derive(Debug, Clone)]
pub struct TimeoutCapability<C> {
    inner: C,
    limit: Duration,
}

impl<C> TimeoutCapability<C> {
    /// Wraps `inner` with a per-call time limit.
    #[must_use]
    pub const fn new(inner: C, limit: Duration) -> Self {
        Self { inner, limit }
    }

    /// Returns the per-call time limit.
    #[must_use]
    pub const fn limit(&self) -> Duration {
        self.limit
    }
}

#[async_trait]
impl<C: Capability> Capability for TimeoutCapability<C> {
    type Input = C::Input;
    type Output = C::Output;

    fn capability_id(&self) -> &str {
        self.inner.capability_id()
    }

    async fn call(
        &self,
        input: &Self::Input,
        context: Option<&ExecutionContext>,
    ) -> CapabilityResult<Self::Output> {
        tokio::time::timeout(self.limit, self.inner.call(input, context))
            .await
            .unwrap_or_else(|_| {
                warn!(
                    capability_id = self.inner.capability_id(),
                    limit_ms = u64::try_from(self.limit.as_millis()).unwrap_or(u64::MAX),
                    "capability call timed out"
                );
                Err(CapabilityError::timeout(self.limit))
            })
    }
}
