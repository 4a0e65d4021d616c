//! Core types for test generation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::audit::TargetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Unit,
    Integration,
}

impl TestKind {
    /// File name suffix, e.g. `productService.integration.test.ts`.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Unit => ".test.ts",
            Self::Integration => ".integration.test.ts",
        }
    }
}

/// A rendered test file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTemplate {
    pub kind: TestKind,
    pub file_path: PathBuf,
    #[serde(skip)]
    pub content: String,
}

/// What a generated suite claims to cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub methods: Vec<String>,
    pub hooks: Vec<String>,
    pub scenarios: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Success,
    Failed,
}

/// Generation outcome for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestGenerationResult {
    pub service: String,
    pub target_file: PathBuf,
    pub kind: TargetKind,
    pub templates: Vec<TestTemplate>,
    pub coverage: Coverage,
    pub status: GenerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestGenerationResult {
    pub fn is_failed(&self) -> bool {
        self.status == GenerationStatus::Failed
    }
}

/// Everything the generator writes to its report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestGenReport {
    pub timestamp: String,
    pub output_dir: PathBuf,
    pub files_written: usize,
    pub results: Vec<TestGenerationResult>,
}
