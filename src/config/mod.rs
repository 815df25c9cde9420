//! Runtime configuration for executors and batch orchestration.
//!
//! Configuration is a JSON document in which every field is optional:
//!
//! ```json
//! {
//!   "retry": {
//!     "maxRetries": 3,
//!     "baseDelayMs": 1000,
//!     "permanentErrorMarkers": ["invalid api key", "quota"]
//!   },
//!   "batch": { "chunkSize": 3, "interBatchDelayMs": 1000 }
//! }
//! ```
//!
//! Absent fields take the defaults of [`RetryPolicy`] and [`BatchPolicy`].

mod error;

pub use error::ConfigError;

use crate::agent::domain::{BatchPolicy, RetryPolicy};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Retry and batch policies resolved from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LecternConfig {
    retry: RetryPolicy,
    batch: BatchPolicy,
}

impl LecternConfig {
    /// Creates a configuration from explicit policies.
    #[must_use]
    pub const fn new(retry: RetryPolicy, batch: BatchPolicy) -> Self {
        Self { retry, batch }
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields
    /// and [`ConfigError::Policy`] for values no policy accepts.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.resolve()
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let json = std::fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the batch policy.
    #[must_use]
    pub const fn batch(&self) -> &BatchPolicy {
        &self.batch
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    retry: RetrySettings,
    #[serde(default)]
    batch: BatchSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RetrySettings {
    max_retries: Option<u32>,
    base_delay_ms: Option<u64>,
    permanent_error_markers: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct BatchSettings {
    chunk_size: Option<usize>,
    inter_batch_delay_ms: Option<u64>,
}

impl ConfigFile {
    fn resolve(self) -> Result<LecternConfig, ConfigError> {
        let defaults = LecternConfig::default();

        let mut retry = self
            .retry
            .max_retries
            .map_or_else(|| defaults.retry.clone(), RetryPolicy::new);
        if let Some(millis) = self.retry.base_delay_ms {
            retry = retry.with_base_delay(Duration::from_millis(millis));
        }
        if let Some(markers) = self.retry.permanent_error_markers {
            retry = retry.with_permanent_error_markers(markers);
        }

        let batch = BatchPolicy::new(
            self.batch
                .chunk_size
                .unwrap_or_else(|| defaults.batch.chunk_size().get()),
            self.batch
                .inter_batch_delay_ms
                .map_or_else(|| defaults.batch.inter_batch_delay(), Duration::from_millis),
        )?;

        Ok(LecternConfig::new(retry, batch))
    }
}
