//! Core types for the service pattern auditor.

use std::fmt;
use std::path::PathBuf;

use farmaudit_core::{Severity, Status};
use serde::{Deserialize, Serialize};

/// Category of an audit gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapType {
    MissingPattern,
    IncorrectImplementation,
    InconsistentNaming,
    MissingErrorHandling,
}

impl GapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingPattern => "missing_pattern",
            Self::IncorrectImplementation => "incorrect_implementation",
            Self::InconsistentNaming => "inconsistent_naming",
            Self::MissingErrorHandling => "missing_error_handling",
        }
    }
}

impl fmt::Display for GapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single deviation from the expected patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    #[serde(rename = "type")]
    pub gap_type: GapType,
    pub severity: Severity,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub suggestion: String,
}

impl Gap {
    pub fn new(
        gap_type: GapType,
        severity: Severity,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            gap_type,
            severity,
            description: description.into(),
            location: None,
            suggestion: suggestion.into(),
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Whether a target is a service module or a React hook module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Service,
    Hook,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Hook => "hook",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    pub service: String,
    pub file: PathBuf,
    pub kind: TargetKind,
    pub score: u32,
    pub gaps: Vec<Gap>,
    pub status: Status,
    pub recommendations: Vec<String>,
}

impl AuditResult {
    pub fn has_critical(&self) -> bool {
        self.gaps.iter().any(|g| g.severity == Severity::Critical)
    }
}

/// Which checks the golden pattern file itself satisfies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenBaseline {
    pub file: Option<PathBuf>,
    pub found: bool,
    pub satisfied: Vec<String>,
    pub missing: Vec<String>,
}

/// Pass/warning/fail tally across scored results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTally {
    pub total: usize,
    pub pass: usize,
    pub warning: usize,
    pub fail: usize,
    pub average_score: f64,
}

impl ScoreTally {
    pub fn from_scores<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, Status)>,
    {
        let mut tally = Self::default();
        let mut sum = 0u64;
        for (score, status) in entries {
            tally.total += 1;
            sum += u64::from(score);
            match status {
                Status::Pass => tally.pass += 1,
                Status::Warning => tally.warning += 1,
                Status::Fail => tally.fail += 1,
            }
        }
        if tally.total > 0 {
            tally.average_score = sum as f64 / tally.total as f64;
        }
        tally
    }
}

/// Everything the auditor writes to its report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub timestamp: String,
    pub golden: GoldenBaseline,
    pub summary: ScoreTally,
    pub results: Vec<AuditResult>,
}
