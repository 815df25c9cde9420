//! Papers and analysis requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bibliographic record for one paper.
///
/// Only the title and authors are required; the optional fields are added
/// to the prompt when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperRecord {
    /// Paper title.
    pub title: String,
    /// Author names in citation order.
    pub authors: Vec<String>,
    /// Publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Abstract text.
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    /// Journal or conference name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl PaperRecord {
    /// Creates a record with the required fields only.
    #[must_use]
    pub fn new<I, S>(title: impl Into<String>, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            authors: authors.into_iter().map(Into::into).collect(),
            year: None,
            abstract_text: None,
            venue: None,
        }
    }

    /// Sets the publication year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the abstract.
    #[must_use]
    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }

    /// Sets the venue.
    #[must_use]
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }
}

/// Kind of analysis requested for a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Short summary with key findings.
    Summary,
    /// Methodological quality score from 1 to 10.
    QualityScore,
    /// Open research gaps and future directions.
    GapAnalysis,
}

impl AnalysisKind {
    /// Every analysis kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Summary, Self::QualityScore, Self::GapAnalysis];

    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::QualityScore => "quality_score",
            Self::GapAnalysis => "gap_analysis",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of the paper analysis capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Paper to analyse.
    pub paper: PaperRecord,
    /// Analysis to produce.
    pub kind: AnalysisKind,
}

impl AnalysisRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(paper: PaperRecord, kind: AnalysisKind) -> Self {
        Self { paper, kind }
    }
}
