//! Core types for the workflow runner.

use std::fmt;

use farmaudit_core::config::ApplyMode;
use farmaudit_core::{FarmauditConfig, WorkflowStep};
use serde::{Deserialize, Serialize};

use crate::reporters::WrittenReport;

/// Reduced outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Warning,
    Failed,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Failed => "failed",
        }
    }

    /// Worst of all statuses; `Success` when empty.
    pub fn worst<I: IntoIterator<Item = StepStatus>>(statuses: I) -> Self {
        statuses
            .into_iter()
            .max_by_key(|s| match s {
                Self::Success => 0,
                Self::Warning => 1,
                Self::Failed => 2,
            })
            .unwrap_or(Self::Success)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub step: WorkflowStep,
    pub status: StepStatus,
    pub duration_ms: u64,
    pub summary: String,
    /// The stage's raw results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl WorkflowResult {
    pub fn failed(step: WorkflowStep, summary: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Failed,
            duration_ms: 0,
            summary: summary.into(),
            details: None,
        }
    }
}

/// What to run and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub steps: Vec<WorkflowStep>,
    /// Halt after the first failed step.
    pub fail_on_errors: bool,
    pub auto_apply: bool,
    /// Overrides the configured apply mode when set.
    pub apply_mode: Option<ApplyMode>,
    /// Print the console summary to stdout when the run ends.
    pub print_summary: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            steps: WorkflowStep::all().to_vec(),
            fail_on_errors: true,
            auto_apply: false,
            apply_mode: None,
            print_summary: true,
        }
    }
}

impl WorkflowOptions {
    /// Options taken from the `[workflow]` and `[fixer]` config sections.
    pub fn from_config(config: &FarmauditConfig) -> Self {
        Self {
            steps: config.workflow.effective_steps(),
            fail_on_errors: config.workflow.effective_fail_on_errors(),
            auto_apply: config.fixer.effective_auto_apply(),
            apply_mode: config.fixer.apply_mode,
            print_summary: true,
        }
    }

    pub fn with_steps(mut self, steps: Vec<WorkflowStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_fail_on_errors(mut self, fail_on_errors: bool) -> Self {
        self.fail_on_errors = fail_on_errors;
        self
    }

    pub fn with_auto_apply(mut self, auto_apply: bool) -> Self {
        self.auto_apply = auto_apply;
        self
    }

    pub fn with_print_summary(mut self, print_summary: bool) -> Self {
        self.print_summary = print_summary;
        self
    }
}

/// Everything a run produced, whether or not it halted.
#[derive(Debug, Clone)]
pub struct WorkflowOutcome {
    pub results: Vec<WorkflowResult>,
    /// Step after which the run stopped early.
    pub halted_at: Option<WorkflowStep>,
    pub total_duration_ms: u64,
    pub report: Option<WrittenReport>,
    pub console_summary: String,
}

impl WorkflowOutcome {
    pub fn overall_status(&self) -> StepStatus {
        StepStatus::worst(self.results.iter().map(|r| r.status))
    }

    pub fn result(&self, step: WorkflowStep) -> Option<&WorkflowResult> {
        self.results.iter().find(|r| r.step == step)
    }
}

/// The consolidated workflow report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub timestamp: String,
    pub steps_requested: Vec<WorkflowStep>,
    pub fail_on_errors: bool,
    pub auto_apply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halted_at: Option<WorkflowStep>,
    pub total_duration_ms: u64,
    pub overall_status: StepStatus,
    pub results: Vec<WorkflowResult>,
}
