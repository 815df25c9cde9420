//! Agent identity metadata.

use super::{AgentDomainError, AgentName, AgentVersion};
use serde::{Deserialize, Serialize};

/// Identity of a registered capability. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    name: AgentName,
    version: AgentVersion,
    description: String,
}

impl AgentDescriptor {
    /// Creates a descriptor from raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError`] when the name or version is invalid.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, AgentDomainError> {
        Ok(Self::from_parts(
            AgentName::new(name)?,
            AgentVersion::new(version)?,
            description,
        ))
    }

    /// Creates a descriptor from validated parts.
    #[must_use]
    pub fn from_parts(
        name: AgentName,
        version: AgentVersion,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name,
            version,
            description: description.into().trim().to_owned(),
        }
    }

    /// Returns the agent name.
    #[must_use]
    pub const fn name(&self) -> &AgentName {
        &self.name
    }

    /// Returns the agent version.
    #[must_use]
    pub const fn version(&self) -> &AgentVersion {
        &self.version
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the registry key `name:version`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.name, self.version)
    }
}
