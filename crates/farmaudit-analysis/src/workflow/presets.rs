//! Named workflow presets. None of them halt on a failed step.

use std::fmt;

use farmaudit_core::WorkflowStep;

use super::types::WorkflowOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// audit, validate
    QuickAudit,
    /// every step, with auto-apply
    FullAutomation,
    /// audit
    AuditOnly,
    /// audit, validate, fix, verify, with auto-apply
    FixOnly,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuickAudit => "quick_audit",
            Self::FullAutomation => "full_automation",
            Self::AuditOnly => "audit_only",
            Self::FixOnly => "fix_only",
        }
    }

    pub fn all() -> &'static [Preset] {
        &[
            Self::QuickAudit,
            Self::FullAutomation,
            Self::AuditOnly,
            Self::FixOnly,
        ]
    }

    /// Accepts the short names (`quick`, `full`, `audit`, `fix`) as well.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "quick" | "quick_audit" => Some(Self::QuickAudit),
            "full" | "full_automation" => Some(Self::FullAutomation),
            "audit" | "audit_only" => Some(Self::AuditOnly),
            "fix" | "fix_only" => Some(Self::FixOnly),
            _ => None,
        }
    }

    pub fn options(&self) -> WorkflowOptions {
        use WorkflowStep::*;
        let (steps, auto_apply) = match self {
            Self::QuickAudit => (vec![Audit, Validate], false),
            Self::FullAutomation => (WorkflowStep::all().to_vec(), true),
            Self::AuditOnly => (vec![Audit], false),
            Self::FixOnly => (vec![Audit, Validate, Fix, Verify], true),
        };
        WorkflowOptions {
            steps,
            fail_on_errors: false,
            auto_apply,
            ..WorkflowOptions::default()
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
