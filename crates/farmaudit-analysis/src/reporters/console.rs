//! Console reporter: human-readable workflow summary with color codes.

use farmaudit_core::errors::ReportError;

use super::Reporter;
use crate::workflow::{StepStatus, WorkflowResult};

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status_symbol(&self, status: StepStatus) -> &'static str {
        match status {
            StepStatus::Success => "✓",
            StepStatus::Warning => "⚠",
            StepStatus::Failed => "✗",
        }
    }

    fn color_start(&self, status: StepStatus) -> &'static str {
        if !self.use_color {
            return "";
        }
        match status {
            StepStatus::Success => "\x1b[32m", // green
            StepStatus::Warning => "\x1b[33m", // yellow
            StepStatus::Failed => "\x1b[31m",  // red
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, results: &[WorkflowResult]) -> Result<String, ReportError> {
        let mut output = String::new();

        output.push_str("╔══════════════════════════════════════════╗\n");
        output.push_str("║          farmaudit Workflow Summary      ║\n");
        output.push_str("╚══════════════════════════════════════════╝\n\n");

        for result in results {
            output.push_str(&format!(
                "{}{} {:<9}{} {} ({} ms)\n",
                self.color_start(result.status),
                self.status_symbol(result.status),
                result.step.as_str(),
                self.color_end(),
                result.summary,
                result.duration_ms,
            ));
        }

        let total_ms: u64 = results.iter().map(|r| r.duration_ms).sum();
        let succeeded = results
            .iter()
            .filter(|r| r.status != StepStatus::Failed)
            .count();
        output.push_str(&format!(
            "\n─── Summary: {succeeded}/{} steps completed without failure in {total_ms} ms ───\n",
            results.len()
        ));

        match StepStatus::worst(results.iter().map(|r| r.status)) {
            StepStatus::Success => output.push_str("Result: PASSED ✓\n"),
            StepStatus::Warning => output.push_str("Result: PASSED WITH WARNINGS ⚠\n"),
            StepStatus::Failed => output.push_str("Result: FAILED ✗\n"),
        }

        Ok(output)
    }
}
