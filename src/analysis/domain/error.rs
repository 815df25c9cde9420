//! Error types for paper analysis.

use super::AnalysisKind;
use crate::agent::domain::CapabilityError;
use thiserror::Error;

/// Errors raised while preparing a prompt or decoding a completion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The prompt template failed to render.
    #[error("failed to render {kind} prompt: {reason}")]
    PromptRender {
        /// Kind whose prompt failed.
        kind: AnalysisKind,
        /// Renderer error message.
        reason: String,
    },

    /// The completion was not the JSON object the kind requires.
    #[error("malformed completion: {0}")]
    MalformedCompletion(String),
}

impl From<AnalysisError> for CapabilityError {
    fn from(error: AnalysisError) -> Self {
        match error {
            // Templates are static, so a render failure repeats on retry.
            AnalysisError::PromptRender { .. } => Self::permanent(error.to_string()),
            AnalysisError::MalformedCompletion(_) => Self::new(error.to_string()),
        }
    }
}
