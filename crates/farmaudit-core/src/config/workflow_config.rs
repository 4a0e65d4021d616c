//! Workflow runner configuration.

use serde::{Deserialize, Serialize};

use crate::types::WorkflowStep;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Stop at the first failed step. Default: true.
    pub fail_on_errors: Option<bool>,
    /// Steps to run, by name. Default: all five.
    #[serde(default)]
    pub steps: Vec<String>,
}

impl WorkflowConfig {
    pub fn effective_fail_on_errors(&self) -> bool {
        self.fail_on_errors.unwrap_or(true)
    }

    /// Parsed steps in the configured order; unknown names are dropped
    /// (rejected earlier by `FarmauditConfig::validate`).
    pub fn effective_steps(&self) -> Vec<WorkflowStep> {
        if self.steps.is_empty() {
            return WorkflowStep::all().to_vec();
        }
        self.steps
            .iter()
            .filter_map(|s| WorkflowStep::parse_str(s))
            .collect()
    }
}
