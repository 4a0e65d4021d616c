//! Report writing errors.

use super::error_code::{self, FarmauditErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize {what}: {message}")]
    Serialize { what: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

impl FarmauditErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
