//! Decoded analysis results.

use super::AnalysisKind;
use serde::{Deserialize, Serialize};

/// Summary of a paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryAnalysis {
    /// A few sentences describing the paper.
    pub summary: String,
    /// Main findings, one per entry.
    pub key_findings: Vec<String>,
}

/// Quality assessment of a paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    /// Score from 1 (poor) to 10 (excellent).
    pub score: u8,
    /// Justification for the score.
    pub rationale: String,
}

/// Research gaps identified in a paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysisReport {
    /// Open questions the paper leaves unanswered.
    pub gaps: Vec<String>,
    /// Suggested follow-up work.
    #[serde(default)]
    pub future_directions: Vec<String>,
}

/// Output of the paper analysis capability, one variant per [`AnalysisKind`].
///
/// Serializes with a `kind` tag:
///
/// ```
/// use lectern::analysis::domain::{AnalysisOutput, QualityAssessment};
///
/// let output = AnalysisOutput::QualityScore(QualityAssessment {
///     score: 7,
///     rationale: "solid evaluation".to_owned(),
/// });
/// let json = serde_json::to_value(&output).expect("serializable");
/// assert_eq!(json["kind"], "quality_score");
/// assert_eq!(json["score"], 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisOutput {
    /// Result of [`AnalysisKind::Summary`].
    Summary(SummaryAnalysis),
    /// Result of [`AnalysisKind::QualityScore`].
    QualityScore(QualityAssessment),
    /// Result of [`AnalysisKind::GapAnalysis`].
    GapAnalysis(GapAnalysisReport),
}

impl AnalysisOutput {
    /// Returns the kind this output answers.
    #[must_use]
    pub const fn kind(&self) -> AnalysisKind {
        match self {
            Self::Summary(_) => AnalysisKind::Summary,
            Self::QualityScore(_) => AnalysisKind::QualityScore,
            Self::GapAnalysis(_) => AnalysisKind::GapAnalysis,
        }
    }
}
