//! Schema validator errors.

use super::error_code::{self, FarmauditErrorCode};

/// Errors that stop the schema validator before any service is checked.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema file not found: {path}")]
    SchemaNotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Schema file {path} defines no tables")]
    NoTables { path: String },

    #[error("Services directory not found: {path}")]
    ServicesDirNotFound { path: String },
}

impl FarmauditErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaNotFound { .. } => error_code::SCHEMA_NOT_FOUND,
            _ => error_code::SCHEMA_ERROR,
        }
    }
}
