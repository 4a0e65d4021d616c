//! Core types for the pattern fixer.

use std::fmt;
use std::path::PathBuf;

use farmaudit_core::config::ApplyMode;
use farmaudit_core::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchType {
    ServicePattern,
    SchemaMapping,
    HookPattern,
}

impl PatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServicePattern => "service_pattern",
            Self::SchemaMapping => "schema_mapping",
            Self::HookPattern => "hook_pattern",
        }
    }
}

impl fmt::Display for PatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal find/replace edit. `original_code` is replaced at its first
/// occurrence in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixPatch {
    pub file: PathBuf,
    #[serde(rename = "type")]
    pub patch_type: PatchType,
    pub description: String,
    pub original_code: String,
    pub fixed_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixStatus {
    Success,
    Partial,
    Failed,
}

impl FixStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for FixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fix outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixResult {
    pub service: String,
    pub file: PathBuf,
    pub patches: Vec<FixPatch>,
    /// Whether the file on disk was rewritten.
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_file: Option<PathBuf>,
    pub status: FixStatus,
    pub errors: Vec<String>,
}

/// Everything the fixer writes to its report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixReport {
    pub timestamp: String,
    pub auto_apply: bool,
    pub apply_mode: ApplyMode,
    pub total_patches: usize,
    pub results: Vec<FixResult>,
}
