//! Delay port used for backoff and inter-batch pauses.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current task for a duration.
///
/// Injected so retry and batch pacing can be tested without real sleeps.
#[async_trait]
pub trait Delay: Send + Sync {
    /// Waits for `duration`.
    async fn sleep(&self, duration: Duration);
}
