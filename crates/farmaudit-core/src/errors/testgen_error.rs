//! Test generator errors.

use super::error_code::{self, FarmauditErrorCode};

/// Errors raised while writing generated test files.
#[derive(Debug, thiserror::Error)]
pub enum TestGenError {
    #[error("Failed to create output directory {path}: {message}")]
    OutputDir { path: String, message: String },

    #[error("Failed to write generated test {path}: {message}")]
    Write { path: String, message: String },
}

impl FarmauditErrorCode for TestGenError {
    fn error_code(&self) -> &'static str {
        error_code::TESTGEN_ERROR
    }
}
