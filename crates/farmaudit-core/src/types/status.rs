//! Pass/warning/fail classification shared by the auditor and the validator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    AUDIT_FAIL_FLOOR, AUDIT_PASS_CEILING, SCHEMA_FAIL_FLOOR, SCHEMA_PASS_CEILING,
};

/// Outcome of a single audited or validated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warning,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warning => "warning",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage-specific score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusThresholds {
    /// Scores below this fail.
    pub fail_floor: u32,
    /// When set, a score equal to `fail_floor` also fails.
    pub floor_inclusive: bool,
    /// Scores at or above this pass (absent a critical finding).
    pub pass_ceiling: u32,
}

impl StatusThresholds {
    /// Service auditor thresholds: `<= 50` fails, `>= 80` passes.
    pub const AUDIT: StatusThresholds = StatusThresholds {
        fail_floor: AUDIT_FAIL_FLOOR,
        floor_inclusive: true,
        pass_ceiling: AUDIT_PASS_CEILING,
    };

    /// Schema validator thresholds: `< 60` fails, `>= 85` passes.
    pub const SCHEMA: StatusThresholds = StatusThresholds {
        fail_floor: SCHEMA_FAIL_FLOOR,
        floor_inclusive: false,
        pass_ceiling: SCHEMA_PASS_CEILING,
    };

    /// Pure function of score and presence of a critical finding.
    pub fn classify(&self, score: u32, has_critical: bool) -> Status {
        let below_floor = score < self.fail_floor
            || (self.floor_inclusive && score == self.fail_floor);
        if has_critical || below_floor {
            Status::Fail
        } else if score < self.pass_ceiling {
            Status::Warning
        } else {
            Status::Pass
        }
    }
}
