//! Workflow errors: the aggregate of every stage error.

use super::error_code::{self, FarmauditErrorCode};
use super::{ConfigError, FixError, ReportError, SchemaError, TestGenError};

/// Errors that can occur while running a stage or the whole workflow.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Fix error: {0}")]
    Fix(#[from] FixError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Test generation error: {0}")]
    TestGen(#[from] TestGenError),

    #[error("Workflow halted at step '{step}': {summary}")]
    Halted { step: String, summary: String },
}

impl FarmauditErrorCode for WorkflowError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Schema(e) => e.error_code(),
            Self::Fix(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::TestGen(e) => e.error_code(),
            Self::Halted { .. } => error_code::STEP_FAILED,
        }
    }
}
