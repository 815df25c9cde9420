//! Port contracts for paper analysis.

pub mod completion;

pub use completion::{Completion, CompletionClient, CompletionError, CompletionRequest};
