//! Configuration errors.

use crate::agent::domain::PolicyError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {}: {source}", .path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid configuration JSON.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value was parsed but rejected by a policy.
    #[error("invalid configuration: {0}")]
    Policy(#[from] PolicyError),
}
