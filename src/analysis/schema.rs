//! Validation schemas for analysis requests and completions.

use crate::analysis::domain::AnalysisKind;
use crate::validation::{FieldRule, FieldType, Schema};

/// Earliest publication year accepted in a request.
pub const MIN_PUBLICATION_YEAR: f64 = 1000.0;
/// Latest publication year accepted in a request.
pub const MAX_PUBLICATION_YEAR: f64 = 2100.0;

/// Schema every [`AnalysisRequest`](crate::analysis::domain::AnalysisRequest)
/// must satisfy before a completion is requested.
#[must_use]
pub fn request_schema() -> Schema {
    Schema::new([
        FieldRule::non_empty_string("paper.title"),
        FieldRule::new("paper.authors")
            .required()
            .of_type(FieldType::Array)
            .non_empty(),
        FieldRule::new("paper.year")
            .of_type(FieldType::Integer)
            .min(MIN_PUBLICATION_YEAR)
            .max(MAX_PUBLICATION_YEAR),
        FieldRule::new("kind")
            .required()
            .of_type(FieldType::String)
            .one_of(AnalysisKind::ALL.map(AnalysisKind::as_str)),
    ])
}

/// Schema the decoded completion JSON must satisfy for `kind`.
#[must_use]
pub fn output_schema(kind: AnalysisKind) -> Schema {
    match kind {
        AnalysisKind::Summary => Schema::new([
            FieldRule::non_empty_string("summary"),
            FieldRule::new("keyFindings")
                .required()
                .of_type(FieldType::Array),
        ]),
        AnalysisKind::QualityScore => Schema::new([
            FieldRule::new("score")
                .required()
                .of_type(FieldType::Integer)
                .min(1.0)
                .max(10.0),
            FieldRule::non_empty_string("rationale"),
        ]),
        AnalysisKind::GapAnalysis => Schema::new([
            FieldRule::new("gaps")
                .required()
                .of_type(FieldType::Array)
                .non_empty(),
            FieldRule::new("futureDirections").of_type(FieldType::Array),
        ]),
    }
}
