//! Completion port: one request to a language model.

use crate::agent::domain::CapabilityError;
use async_trait::async_trait;
use thiserror::Error;

/// Prompt pair sent to a language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    system_prompt: String,
    user_prompt: String,
    model: Option<String>,
}

impl CompletionRequest {
    /// Creates a request for the client's default model.
    #[must_use]
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            model: None,
        }
    }

    /// Asks for a specific model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Returns the system prompt.
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Returns the user prompt.
    #[must_use]
    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    /// Returns the requested model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

/// Text returned by a language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    text: String,
    tokens_used: Option<u64>,
    model: Option<String>,
}

impl Completion {
    /// Creates a completion without usage information.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens_used: None,
            model: None,
        }
    }

    /// Records the total tokens billed for the request.
    #[must_use]
    pub const fn with_tokens_used(mut self, tokens_used: u64) -> Self {
        self.tokens_used = Some(tokens_used);
        self
    }

    /// Records the model that served the request.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Returns the raw completion text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the billed token count.
    #[must_use]
    pub const fn tokens_used(&self) -> Option<u64> {
        self.tokens_used
    }

    /// Returns the serving model.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

/// Errors returned by completion clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// The request failed; retry classification uses the message.
    #[error("completion request failed: {0}")]
    Request(String),

    /// The provider refused the request outright.
    #[error("completion rejected: {0}")]
    Rejected(String),
}

impl From<CompletionError> for CapabilityError {
    fn from(error: CompletionError) -> Self {
        match error {
            CompletionError::Request(_) => Self::new(error.to_string()),
            CompletionError::Rejected(_) => Self::permanent(error.to_string()),
        }
    }
}

/// Language model client.
///
/// Implementations perform exactly one provider request per call and apply
/// their own timeout.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Requests one completion.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the provider call fails.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}
