//! Pattern fixer errors.

use super::error_code::{self, FarmauditErrorCode};

/// Errors raised while backing up or patching a source file.
/// Captured per file into the fix result, never propagated past the fixer.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("Patch '{description}' no longer matches {file}")]
    PatchNotApplicable { file: String, description: String },

    #[error("Backup of {file} to {backup} failed: {message}")]
    BackupFailed {
        file: String,
        backup: String,
        message: String,
    },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

impl FarmauditErrorCode for FixError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PatchNotApplicable { .. } => error_code::PATCH_NOT_APPLICABLE,
            Self::BackupFailed { .. } => error_code::BACKUP_FAILED,
            Self::Io { .. } => error_code::FIX_ERROR,
        }
    }
}
