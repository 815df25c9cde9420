//! Paper analysis agents.
//!
//! The first application built on [`crate::agent`]: LLM-generated analysis
//! columns for a table of research papers. Each request names one paper and
//! one [`AnalysisKind`](domain::AnalysisKind); the capability renders a
//! prompt for that kind, asks a [`CompletionClient`](ports::CompletionClient)
//! for a JSON answer, validates the answer against the kind's output schema
//! and decodes it into an [`AnalysisOutput`](domain::AnalysisOutput).
//!
//! Request and output schemas live in [`schema`], prompt templates in
//! [`prompt`].

pub mod domain;
pub mod ports;
pub mod prompt;
pub mod schema;
pub mod services;

#[cfg(test)]
mod tests;
