//! Prompt templates for paper analysis.
//!
//! Each [`AnalysisKind`] has an instruction template that includes a shared
//! paper block. Templates are rendered with `minijinja` against the
//! serialized [`AnalysisRequest`], so they can reference `paper.title`,
//! `paper.authors`, `paper.year`, `paper.abstract` and `paper.venue`.

use crate::analysis::domain::{AnalysisError, AnalysisKind, AnalysisRequest};
use minijinja::Environment;

/// System prompt sent with every analysis request.
pub const SYSTEM_PROMPT: &str = "You are a research assistant reviewing academic papers. \
Respond with a single JSON object and no other text.";

const PAPER_TEMPLATE_NAME: &str = "paper";

const PAPER_TEMPLATE: &str = "\
Title: {{ paper.title }}
Authors: {{ paper.authors | join(\", \") }}
{% if paper.year %}
Year: {{ paper.year }}
{% endif %}
{% if paper.venue %}
Venue: {{ paper.venue }}
{% endif %}
{% if paper.abstract %}
Abstract: {{ paper.abstract }}
{% endif %}";

const SUMMARY_TEMPLATE: &str = "\
Summarise the paper below for a literature review.
Return JSON with the fields \"summary\" (two or three sentences) and \
\"keyFindings\" (an array of short strings).

{% include \"paper\" %}";

const QUALITY_SCORE_TEMPLATE: &str = "\
Rate the methodological quality of the paper below.
Return JSON with the fields \"score\" (an integer from 1 to 10) and \
\"rationale\" (one paragraph).

{% include \"paper\" %}";

const GAP_ANALYSIS_TEMPLATE: &str = "\
Identify open research gaps left by the paper below.
Return JSON with the fields \"gaps\" (a non-empty array of strings) and \
\"futureDirections\" (an array of strings).

{% include \"paper\" %}";

/// Returns the instruction template for `kind`.
#[must_use]
pub const fn template_for(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::Summary => SUMMARY_TEMPLATE,
        AnalysisKind::QualityScore => QUALITY_SCORE_TEMPLATE,
        AnalysisKind::GapAnalysis => GAP_ANALYSIS_TEMPLATE,
    }
}

/// Renders the user prompt for `request`.
///
/// # Errors
///
/// Returns [`AnalysisError::PromptRender`] when a template fails to parse
/// or render.
pub fn render_prompt(request: &AnalysisRequest) -> Result<String, AnalysisError> {
    let render_error = |error: minijinja::Error| AnalysisError::PromptRender {
        kind: request.kind,
        reason: error.to_string(),
    };

    let mut environment = Environment::new();
    environment.set_trim_blocks(true);
    environment
        .add_template(PAPER_TEMPLATE_NAME, PAPER_TEMPLATE)
        .map_err(render_error)?;
    environment
        .render_str(template_for(request.kind), request)
        .map_err(render_error)
}
