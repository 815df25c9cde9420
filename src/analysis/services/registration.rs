//! Registry wiring for the paper analysis agent.

use super::PaperAnalysisCapability;
use crate::agent::{
    domain::{AgentDescriptor, AgentDomainError},
    services::{AgentRegistry, RegisteredAgent},
};
use crate::analysis::{
    domain::{AnalysisOutput, AnalysisRequest},
    ports::CompletionClient,
};
use std::sync::Arc;

/// Registry name of the paper analysis agent.
pub const PAPER_ANALYSIS_NAME: &str = "paper_analysis";
/// Registry version of the paper analysis agent.
pub const PAPER_ANALYSIS_VERSION: &str = "1.0.0";

/// Registry holding paper analysis agents.
pub type PaperAnalysisRegistry = AgentRegistry<AnalysisRequest, AnalysisOutput>;

/// Registers a [`PaperAnalysisCapability`] backed by `client` as
/// `paper_analysis:1.0.0`.
///
/// Returns the entry that was replaced, if any.
///
/// # Errors
///
/// Returns [`AgentDomainError`] if the built-in name or version fails
/// validation.
pub fn register_paper_analysis<C>(
    registry: &PaperAnalysisRegistry,
    client: Arc<C>,
) -> Result<Option<RegisteredAgent<AnalysisRequest, AnalysisOutput>>, AgentDomainError>
where
    C: CompletionClient + 'static,
{
    let descriptor = AgentDescriptor::new(
        PAPER_ANALYSIS_NAME,
        PAPER_ANALYSIS_VERSION,
        "Summaries, quality scores and gap analyses for research papers",
    )?;
    Ok(registry.register(
        descriptor,
        Arc::new(PaperAnalysisCapability::new(client)),
    ))
}
