//! Validated agent name and version types.

use super::AgentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an agent name.
const MAX_NAME_LENGTH: usize = 100;

/// Validated, lowercase agent identifier (e.g. `paper_analysis`).
///
/// Names are unique within a version; together with an [`AgentVersion`]
/// they form the registry key `name:version`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentName(String);

impl AgentName {
    /// Creates a validated agent name.
    ///
    /// The input is trimmed and lowercased. Only characters in
    /// `[a-z0-9_-]` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::EmptyAgentName`] when the value is empty
    /// after trimming, [`AgentDomainError::InvalidAgentName`] when it
    /// contains other characters, or [`AgentDomainError::AgentNameTooLong`]
    /// when it exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AgentDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(AgentDomainError::EmptyAgentName);
        }

        if normalized.len() > MAX_NAME_LENGTH {
            return Err(AgentDomainError::AgentNameTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

        if !is_valid {
            return Err(AgentDomainError::InvalidAgentName(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the agent name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentName {
    type Error = AgentDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentName> for String {
    fn from(name: AgentName) -> Self {
        name.0
    }
}

impl AsRef<str> for AgentName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semver-like agent version string.
///
/// Versions order lexicographically, not numerically: `1.10.0` sorts before
/// `1.9.0`. Callers that need numeric ordering must zero-pad components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentVersion(String);

impl AgentVersion {
    /// Creates a validated version.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::EmptyVersion`] when the value is blank or
    /// [`AgentDomainError::InvalidVersion`] when it contains whitespace or
    /// `:`.
    pub fn new(value: impl Into<String>) -> Result<Self, AgentDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(AgentDomainError::EmptyVersion);
        }

        if trimmed.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(AgentDomainError::InvalidVersion(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentVersion {
    type Error = AgentDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentVersion> for String {
    fn from(version: AgentVersion) -> Self {
        version.0
    }
}

impl fmt::Display for AgentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
