//! Tokio-backed delay adapter.

use crate::agent::ports::Delay;
use async_trait::async_trait;
use std::time::Duration;

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
