//! JSON reporter: structured output of step results.

use farmaudit_core::errors::ReportError;
use serde_json::json;

use super::Reporter;
use crate::workflow::{StepStatus, WorkflowResult};

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, results: &[WorkflowResult]) -> Result<String, ReportError> {
        let steps: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                json!({
                    "step": r.step,
                    "status": r.status,
                    "duration_ms": r.duration_ms,
                    "summary": r.summary,
                })
            })
            .collect();

        let output = json!({
            "overall_status": StepStatus::worst(results.iter().map(|r| r.status)),
            "step_count": results.len(),
            "total_duration_ms": results.iter().map(|r| r.duration_ms).sum::<u64>(),
            "steps": steps,
        });

        serde_json::to_string_pretty(&output).map_err(|e| ReportError::Serialize {
            what: "workflow results".to_string(),
            message: e.to_string(),
        })
    }
}
