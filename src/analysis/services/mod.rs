//! Service layer for paper analysis.

pub mod capability;
pub mod registration;

pub use capability::{PaperAnalysisCapability, parse_completion, strip_code_fences};
pub use registration::{
    PAPER_ANALYSIS_NAME, PAPER_ANALYSIS_VERSION, PaperAnalysisRegistry, register_paper_analysis,
};
