//! Domain model for paper analysis.

mod error;
mod output;
mod paper;

pub use error::AnalysisError;
pub use output::{AnalysisOutput, GapAnalysisReport, QualityAssessment, SummaryAnalysis};
pub use paper::{AnalysisKind, AnalysisRequest, PaperRecord};
