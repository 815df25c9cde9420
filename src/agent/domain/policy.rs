//! Retry and batch policies.

use super::{CapabilityError, PolicyError};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry; doubles for each further retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Default number of items dispatched concurrently per chunk.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(2);

/// Default pause between chunks.
pub const DEFAULT_INTER_BATCH_DELAY: Duration = Duration::from_secs(1);

/// Message fragments meaning "retrying cannot help".
const DEFAULT_PERMANENT_MARKERS: [&str; 8] = [
    "invalid api key",
    "invalid credentials",
    "unauthorized",
    "rate limit exceeded",
    "model not found",
    "capability not found",
    "validation",
    "quota",
];

/// Whether a failed attempt is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Presumed recoverable: timeouts, network blips, generic server errors.
    Transient,
    /// Retrying cannot help: bad credentials, rate limits, quota, not found.
    Permanent,
}

/// Per-agent-type retry configuration.
///
/// # Examples
///
/// ```
/// use lectern::agent::domain::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(2);
/// assert_eq!(policy.backoff_for(0), Duration::from_secs(1));
/// assert_eq!(policy.backoff_for(2), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    permanent_error_markers: Vec<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl RetryPolicy {
    /// Creates a policy with the given retry cap and default backoff and
    /// markers.
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
            permanent_error_markers: DEFAULT_PERMANENT_MARKERS
                .iter()
                .map(|marker| (*marker).to_owned())
                .collect(),
        }
    }

    /// Sets the delay before the first retry.
    #[must_use]
    pub const fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Replaces the permanent-error markers. Matching ignores case.
    #[must_use]
    pub fn with_permanent_error_markers(
        mut self,
        markers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.permanent_error_markers = markers
            .into_iter()
            .map(|marker| marker.into().to_lowercase())
            .collect();
        self
    }

    /// Returns the maximum number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the delay before the first retry.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns the configured permanent-error markers.
    #[must_use]
    pub fn permanent_error_markers(&self) -> &[String] {
        &self.permanent_error_markers
    }

    /// Returns the delay to wait after failed attempt `attempt` (zero based)
    /// before the next one: `base_delay * 2^attempt`, saturating.
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt))
    }

    /// Classifies a capability failure.
    #[must_use]
    pub fn classify(&self, error: &CapabilityError) -> FailureClass {
        if error.is_marked_permanent() {
            return FailureClass::Permanent;
        }
        let message = error.message().to_lowercase();
        if self
            .permanent_error_markers
            .iter()
            .any(|marker| message.contains(marker.as_str()))
        {
            FailureClass::Permanent
        } else {
            FailureClass::Transient
        }
    }
}

/// Chunking and pacing for batch execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    chunk_size: NonZeroUsize,
    inter_batch_delay: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            inter_batch_delay: DEFAULT_INTER_BATCH_DELAY,
        }
    }
}

impl BatchPolicy {
    /// Creates a batch policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ZeroChunkSize`] when `chunk_size` is zero.
    pub fn new(chunk_size: usize, inter_batch_delay: Duration) -> Result<Self, PolicyError> {
        let size = NonZeroUsize::new(chunk_size).ok_or(PolicyError::ZeroChunkSize)?;
        Ok(Self {
            chunk_size: size,
            inter_batch_delay,
        })
    }

    /// Returns the number of items dispatched concurrently per chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// Returns the pause between consecutive chunks.
    #[must_use]
    pub const fn inter_batch_delay(&self) -> Duration {
        self.inter_batch_delay
    }
}
