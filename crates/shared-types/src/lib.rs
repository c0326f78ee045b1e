pub mod payload;
pub mod types;

pub use payload::AnalysisPayload;
pub use types::{
    AnalysisResult, AnalysisVariant, Issue, ScoreBand, Severity, ERROR_SENTINEL_SECTION,
};
