//! Workflow step identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five steps the workflow runner can sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStep {
    Audit,
    Validate,
    Fix,
    Test,
    Verify,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audit => "audit",
            Self::Validate => "validate",
            Self::Fix => "fix",
            Self::Test => "test",
            Self::Verify => "verify",
        }
    }

    /// All steps in canonical execution order.
    pub fn all() -> &'static [WorkflowStep] {
        &[
            Self::Audit,
            Self::Validate,
            Self::Fix,
            Self::Test,
            Self::Verify,
        ]
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "audit" => Some(Self::Audit),
            "validate" => Some(Self::Validate),
            "fix" => Some(Self::Fix),
            "test" | "tests" => Some(Self::Test),
            "verify" => Some(Self::Verify),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
