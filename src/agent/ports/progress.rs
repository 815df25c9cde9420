//! Progress reporting port for batch execution.

use thiserror::Error;

/// Result type for progress reporting.
pub type ProgressResult = Result<(), ProgressError>;

/// Snapshot emitted after each batch item completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    completed: usize,
    total: usize,
}

impl BatchProgress {
    /// Creates a progress snapshot.
    #[must_use]
    pub const fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Returns the number of items that reached a terminal result.
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Returns the number of items in the batch.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }
}

/// Failure raised by a progress reporter.
///
/// The batch orchestrator logs and discards these; a reporter can never
/// abort a batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("progress reporting failed: {0}")]
pub struct ProgressError(String);

impl ProgressError {
    /// Creates a progress error with a diagnostic message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Receives batch progress updates.
pub trait ProgressReporter: Send + Sync {
    /// Handles one progress update.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError`] when the update cannot be delivered.
    fn report(&self, progress: BatchProgress) -> ProgressResult;
}

impl<F> ProgressReporter for F
where
    F: Fn(BatchProgress) -> ProgressResult + Send + Sync,
{
    fn report(&self, progress: BatchProgress) -> ProgressResult {
        self(progress)
    }
}
