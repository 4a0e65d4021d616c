//! Severity levels and the per-stage deduction weights.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::MAX_SCORE;

/// Severity of a gap or mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// All severities, most severe first (report grouping order).
    pub fn descending() -> &'static [Severity] {
        &[Self::Critical, Self::High, Self::Medium, Self::Low]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points deducted from a perfect score per finding of each severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityWeights {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityWeights {
    /// Service pattern auditor weights.
    pub const AUDIT: SeverityWeights = SeverityWeights {
        critical: 25,
        high: 15,
        medium: 10,
        low: 5,
    };

    /// Schema validator weights.
    pub const SCHEMA: SeverityWeights = SeverityWeights {
        critical: 30,
        high: 20,
        medium: 10,
        low: 5,
    };

    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    /// 100 minus the summed weights, clamped to `[0, 100]`.
    pub fn score<I>(&self, severities: I) -> u32
    where
        I: IntoIterator<Item = Severity>,
    {
        let deducted: u64 = severities
            .into_iter()
            .map(|s| u64::from(self.weight(s)))
            .sum();
        u64::from(MAX_SCORE).saturating_sub(deducted) as u32
    }
}
