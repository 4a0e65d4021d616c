//! WorkflowRunner: runs the selected steps in order and reports on them.

use std::io::IsTerminal;
use std::time::Instant;

use farmaudit_core::config::ResolvedPaths;
use farmaudit_core::constants::{
    AUDIT_FAIL_FLOOR, AUDIT_PASS_CEILING, SCHEMA_FAIL_FLOOR, SCHEMA_PASS_CEILING,
};
use farmaudit_core::errors::{FarmauditErrorCode, WorkflowError};
use farmaudit_core::types::report_timestamp;
use farmaudit_core::{AuditConfig, FarmauditConfig, Status, WorkflowStep};
use serde::Serialize;
use serde_json::json;

use super::types::{StepStatus, WorkflowOptions, WorkflowOutcome, WorkflowReport, WorkflowResult};
use crate::audit::{AuditResult, ScoreTally, ServiceAuditor};
use crate::fixer::{FixResult, FixStatus, FixerOptions, PatternFixer};
use crate::reporters::console::ConsoleReporter;
use crate::reporters::{ReportWriter, Reporter};
use crate::schema::{SchemaValidator, ValidationResult};
use crate::testgen::{TestGenerationResult, TestGenerator};

/// Step outcome before timing is attached.
struct StepOutput {
    status: StepStatus,
    summary: String,
    details: Option<serde_json::Value>,
}

/// Sequences the pipeline stages.
pub struct WorkflowRunner<'a> {
    audit: &'a AuditConfig,
    config: &'a FarmauditConfig,
    paths: &'a ResolvedPaths,
}

impl<'a> WorkflowRunner<'a> {
    pub fn new(
        audit: &'a AuditConfig,
        config: &'a FarmauditConfig,
        paths: &'a ResolvedPaths,
    ) -> Self {
        Self {
            audit,
            config,
            paths,
        }
    }

    /// Run the steps and fail if the run halted on a failed step.
    ///
    /// The workflow report and console summary are written either way.
    pub fn run(&self, options: &WorkflowOptions) -> Result<WorkflowOutcome, WorkflowError> {
        let outcome = self.execute(options);
        if let Some(step) = outcome.halted_at {
            let summary = outcome
                .result(step)
                .map(|r| r.summary.clone())
                .unwrap_or_default();
            return Err(WorkflowError::Halted {
                step: step.to_string(),
                summary,
            });
        }
        Ok(outcome)
    }

    /// Run the steps and return everything gathered, halted or not.
    pub fn execute(&self, options: &WorkflowOptions) -> WorkflowOutcome {
        let started = Instant::now();
        let steps: Vec<String> = options.steps.iter().map(|s| s.to_string()).collect();
        tracing::info!(
            steps = %steps.join(","),
            fail_on_errors = options.fail_on_errors,
            auto_apply = options.auto_apply,
            "workflow started"
        );

        let mut results = Vec::with_capacity(options.steps.len());
        let mut halted_at = None;
        for &step in &options.steps {
            let result = self.run_step(step, options);
            let failed = result.status == StepStatus::Failed;
            results.push(result);
            if failed && options.fail_on_errors {
                tracing::warn!(step = %step, "step failed, halting workflow");
                halted_at = Some(step);
                break;
            }
        }

        let total_duration_ms = elapsed_ms(started);
        let report = WorkflowReport {
            timestamp: report_timestamp(),
            steps_requested: options.steps.clone(),
            fail_on_errors: options.fail_on_errors,
            auto_apply: options.auto_apply,
            halted_at,
            total_duration_ms,
            overall_status: StepStatus::worst(results.iter().map(|r| r.status)),
            results: results.clone(),
        };
        let written = match self.writer().write(&report) {
            Ok(written) => Some(written),
            Err(e) => {
                tracing::error!(error = %e, "failed to write workflow report");
                None
            }
        };

        let console = ConsoleReporter::new(options.print_summary && std::io::stdout().is_terminal());
        let console_summary = console.generate(&results).unwrap_or_default();
        if options.print_summary {
            print!("{console_summary}");
        }

        tracing::info!(
            steps_run = results.len(),
            status = report.overall_status.as_str(),
            duration_ms = total_duration_ms,
            "workflow finished"
        );
        WorkflowOutcome {
            results,
            halted_at,
            total_duration_ms,
            report: written,
            console_summary,
        }
    }

    fn run_step(&self, step: WorkflowStep, options: &WorkflowOptions) -> WorkflowResult {
        tracing::info!(step = %step, "step started");
        let started = Instant::now();
        let output = match step {
            WorkflowStep::Audit => self.step_audit(),
            WorkflowStep::Validate => self.step_validate(),
            WorkflowStep::Fix => self.step_fix(options),
            WorkflowStep::Test => self.step_test(),
            WorkflowStep::Verify => self.step_verify(),
        };
        let duration_ms = elapsed_ms(started);

        let result = match output {
            Ok(out) => WorkflowResult {
                step,
                status: out.status,
                duration_ms,
                summary: out.summary,
                details: out.details,
            },
            Err(e) => {
                tracing::error!(step = %step, error = %e, "step errored");
                WorkflowResult {
                    duration_ms,
                    ..WorkflowResult::failed(step, e.coded_string())
                }
            }
        };
        tracing::info!(
            step = %step,
            status = result.status.as_str(),
            duration_ms,
            "step finished"
        );
        result
    }

    fn writer(&self) -> ReportWriter {
        ReportWriter::new(&self.paths.reports_dir)
    }

    fn validator(&self) -> Result<SchemaValidator, WorkflowError> {
        Ok(SchemaValidator::load(&self.paths.schema_file)?)
    }

    fn step_audit(&self) -> Result<StepOutput, WorkflowError> {
        let (results, _) = ServiceAuditor::new(self.audit).run_and_report(&self.writer())?;
        let (status, summary) = reduce_audit(&results);
        Ok(StepOutput {
            status,
            summary,
            details: to_details(&results),
        })
    }

    fn step_validate(&self) -> Result<StepOutput, WorkflowError> {
        let validator = self.validator()?;
        let (results, _) = validator.run_and_report(&self.paths.services_dir, &self.writer())?;
        let (status, summary) = reduce_validation(&results);
        Ok(StepOutput {
            status,
            summary,
            details: to_details(&results),
        })
    }

    fn step_fix(&self, options: &WorkflowOptions) -> Result<StepOutput, WorkflowError> {
        let validator = self.validator()?;
        let mut fixer_options =
            FixerOptions::from_config(self.config, self.paths).with_auto_apply(options.auto_apply);
        if let Some(mode) = options.apply_mode {
            fixer_options.apply_mode = mode;
        }
        let fixer = PatternFixer::new(self.audit, &validator, fixer_options);
        let (results, _) = fixer.run_and_report(&self.writer())?;
        let (status, summary) = reduce_fixes(&results);
        Ok(StepOutput {
            status,
            summary,
            details: to_details(&results),
        })
    }

    fn step_test(&self) -> Result<StepOutput, WorkflowError> {
        let generator = TestGenerator::new(&self.paths.generated_tests_dir);
        let (results, _) = generator.run_and_report(self.audit, &self.writer())?;
        let (status, summary) = reduce_tests(&results);
        Ok(StepOutput {
            status,
            summary,
            details: to_details(&results),
        })
    }

    /// Re-run audit and validation without writing their reports.
    fn step_verify(&self) -> Result<StepOutput, WorkflowError> {
        let audit_results = ServiceAuditor::new(self.audit).run();
        let validation_results = self.validator()?.validate_dir(&self.paths.services_dir)?;

        let audit_avg = average(audit_results.iter().map(|r| (r.score, r.status)));
        let schema_avg = average(validation_results.iter().map(|r| (r.score, r.status)));
        let (status, summary) = reduce_verify(audit_avg, schema_avg);
        Ok(StepOutput {
            status,
            summary,
            details: Some(json!({
                "average_audit_score": audit_avg,
                "average_schema_score": schema_avg,
                "audited_files": audit_results.len(),
                "validated_files": validation_results.len(),
            })),
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn to_details<T: Serialize>(results: &[T]) -> Option<serde_json::Value> {
    serde_json::to_value(results).ok()
}

/// Average score; an empty set counts as a perfect score.
fn average<I: IntoIterator<Item = (u32, Status)>>(entries: I) -> f64 {
    let tally = ScoreTally::from_scores(entries);
    if tally.total == 0 {
        100.0
    } else {
        tally.average_score
    }
}

fn reduce_by_status(tally: &ScoreTally) -> StepStatus {
    if tally.fail > 0 {
        StepStatus::Failed
    } else if tally.warning > 0 {
        StepStatus::Warning
    } else {
        StepStatus::Success
    }
}

/// failed if any result fails, warning if any warns.
pub fn reduce_audit(results: &[AuditResult]) -> (StepStatus, String) {
    let tally = ScoreTally::from_scores(results.iter().map(|r| (r.score, r.status)));
    let summary = format!(
        "{} files audited: {} pass, {} warning, {} fail (average score {:.1})",
        tally.total, tally.pass, tally.warning, tally.fail, tally.average_score
    );
    (reduce_by_status(&tally), summary)
}

pub fn reduce_validation(results: &[ValidationResult]) -> (StepStatus, String) {
    let tally = ScoreTally::from_scores(results.iter().map(|r| (r.score, r.status)));
    let mismatches: usize = results.iter().map(|r| r.mismatches.len()).sum();
    let summary = format!(
        "{} services validated, {} mismatches: {} pass, {} warning, {} fail",
        tally.total, mismatches, tally.pass, tally.warning, tally.fail
    );
    (reduce_by_status(&tally), summary)
}

/// failed if any fix failed, warning if any was partial.
pub fn reduce_fixes(results: &[FixResult]) -> (StepStatus, String) {
    let count = |status: FixStatus| results.iter().filter(|r| r.status == status).count();
    let (failed, partial) = (count(FixStatus::Failed), count(FixStatus::Partial));
    let patches: usize = results.iter().map(|r| r.patches.len()).sum();
    let applied = results.iter().filter(|r| r.applied).count();
    let summary = format!(
        "{patches} patches for {} files: {applied} files rewritten, {partial} partial, {failed} failed",
        results.len()
    );
    let status = if failed > 0 {
        StepStatus::Failed
    } else if partial > 0 {
        StepStatus::Warning
    } else {
        StepStatus::Success
    };
    (status, summary)
}

/// failed if any target could not be generated.
pub fn reduce_tests(results: &[TestGenerationResult]) -> (StepStatus, String) {
    let failed = results.iter().filter(|r| r.is_failed()).count();
    let files: usize = results.iter().map(|r| r.templates.len()).sum();
    let scenarios: usize = results.iter().map(|r| r.coverage.scenarios.len()).sum();
    let summary = format!(
        "{files} test files for {} targets, {scenarios} scenarios, {failed} failed",
        results.len()
    );
    let status = if failed > 0 {
        StepStatus::Failed
    } else {
        StepStatus::Success
    };
    (status, summary)
}

/// Thresholds on the average scores: audit < 50 / schema < 60 fail,
/// audit < 80 / schema < 85 warn.
pub fn reduce_verify(audit_avg: f64, schema_avg: f64) -> (StepStatus, String) {
    let status = if audit_avg < f64::from(AUDIT_FAIL_FLOOR)
        || schema_avg < f64::from(SCHEMA_FAIL_FLOOR)
    {
        StepStatus::Failed
    } else if audit_avg < f64::from(AUDIT_PASS_CEILING) || schema_avg < f64::from(SCHEMA_PASS_CEILING)
    {
        StepStatus::Warning
    } else {
        StepStatus::Success
    };
    let summary = format!(
        "average audit score {audit_avg:.1}, average schema score {schema_avg:.1}"
    );
    (status, summary)
}
