//! Delay adapter that records requests instead of sleeping.

use crate::agent::ports::Delay;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Records every requested delay and returns immediately.
///
/// Clones share the same record, so a test can keep one handle while the
/// executor owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    requested: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingDelay {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the requested delays in call order.
    #[must_use]
    pub fn requested(&self) -> Vec<Duration> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        tokio::task::yield_now().await;
    }
}
