//! Cross-cutting metadata attached to a call.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Optional metadata passed through to the capability untouched.
///
/// The framework never mutates a context; executors hand the same reference
/// to every attempt of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    caller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
    #[serde(default)]
    preferences: Map<String, Value>,
    timestamp: DateTime<Utc>,
}

impl ExecutionContext {
    /// Creates an empty context stamped with the current clock time.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            caller_id: None,
            session_id: None,
            preferences: Map::new(),
            timestamp: clock.utc(),
        }
    }

    /// Sets the caller identity.
    #[must_use]
    pub fn with_caller_id(mut self, caller_id: impl Into<String>) -> Self {
        self.caller_id = Some(caller_id.into());
        self
    }

    /// Sets the session identity.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Adds or replaces a free-form preference.
    #[must_use]
    pub fn with_preference(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.preferences.insert(key.into(), value.into());
        self
    }

    /// Returns the caller identity, if any.
    #[must_use]
    pub fn caller_id(&self) -> Option<&str> {
        self.caller_id.as_deref()
    }

    /// Returns the session identity, if any.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Returns a preference by key.
    #[must_use]
    pub fn preference(&self, key: &str) -> Option<&Value> {
        self.preferences.get(key)
    }

    /// Returns all preferences.
    #[must_use]
    pub const fn preferences(&self) -> &Map<String, Value> {
        &self.preferences
    }

    /// Returns the time the context was created.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
