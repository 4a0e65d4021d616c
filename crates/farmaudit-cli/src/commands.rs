//! Subcommand bodies. Each returns the reduced status of what it ran.

use std::path::Path;

use farmaudit_analysis::fixer::FixerOptions;
use farmaudit_analysis::reporters::{create_reporter, ReportWriter, WrittenReport};
use farmaudit_analysis::workflow::runner::{
    reduce_audit, reduce_fixes, reduce_tests, reduce_validation,
};
use farmaudit_analysis::workflow::{Preset, StepStatus};
use farmaudit_analysis::{
    PatternFixer, SchemaValidator, ServiceAuditor, TestGenerator, WorkflowOptions, WorkflowRunner,
};
use farmaudit_core::config::{CliOverrides, ResolvedPaths};
use farmaudit_core::errors::{ConfigError, WorkflowError};
use farmaudit_core::{AuditConfig, FarmauditConfig, Status, WorkflowStep};

/// Resolved configuration for one invocation.
pub struct Context {
    pub root: std::path::PathBuf,
    pub config: FarmauditConfig,
    pub paths: ResolvedPaths,
}

impl Context {
    pub fn load(root: &Path, overrides: &CliOverrides) -> Result<Self, WorkflowError> {
        let config = FarmauditConfig::load(root, Some(overrides))?;
        let paths = config.resolve_paths(root);
        tracing::debug!(
            root = %root.display(),
            audit_config = %paths.audit_config.display(),
            reports = %paths.reports_dir.display(),
            "configuration loaded"
        );
        Ok(Self {
            root: root.to_path_buf(),
            config,
            paths,
        })
    }

    /// The audit target list; only stages that need targets load it.
    fn audit_config(&self) -> Result<AuditConfig, ConfigError> {
        AuditConfig::load(&self.paths.audit_config, &self.root)
    }

    fn writer(&self) -> ReportWriter {
        ReportWriter::new(&self.paths.reports_dir)
    }
}

fn symbol(status: Status) -> &'static str {
    match status {
        Status::Pass => "✓",
        Status::Warning => "⚠",
        Status::Fail => "✗",
    }
}

fn finish(status: StepStatus, summary: &str, written: &WrittenReport) -> StepStatus {
    println!("\n{summary}");
    println!("Report: {}", written.json.display());
    println!("        {}", written.markdown.display());
    status
}

pub fn audit(ctx: &Context) -> Result<StepStatus, WorkflowError> {
    let audit = ctx.audit_config()?;
    let (results, written) = ServiceAuditor::new(&audit).run_and_report(&ctx.writer())?;
    for r in &results {
        println!(
            "{} {:<32} {:>3}/100  {} gaps",
            symbol(r.status),
            r.service,
            r.score,
            r.gaps.len()
        );
    }
    let (status, summary) = reduce_audit(&results);
    Ok(finish(status, &summary, &written))
}

pub fn validate(ctx: &Context) -> Result<StepStatus, WorkflowError> {
    let validator = SchemaValidator::load(&ctx.paths.schema_file)?;
    let (results, written) = validator.run_and_report(&ctx.paths.services_dir, &ctx.writer())?;
    for r in &results {
        println!(
            "{} {:<32} {:>3}/100  {} mismatches",
            symbol(r.status),
            r.service,
            r.score,
            r.mismatches.len()
        );
        for m in r.critical() {
            println!("    {}", m.description);
        }
    }
    let (status, summary) = reduce_validation(&results);
    Ok(finish(status, &summary, &written))
}

pub fn fix(ctx: &Context) -> Result<StepStatus, WorkflowError> {
    let audit = ctx.audit_config()?;
    let validator = SchemaValidator::load(&ctx.paths.schema_file)?;
    let options = FixerOptions::from_config(&ctx.config, &ctx.paths);
    let (results, written) =
        PatternFixer::new(&audit, &validator, options).run_and_report(&ctx.writer())?;
    for r in &results {
        let applied = if r.applied { "applied" } else { "described" };
        println!(
            "{:<8} {:<32} {} patches, {applied}",
            r.status.as_str(),
            r.service,
            r.patches.len()
        );
        if let Some(ref patch_file) = r.patch_file {
            println!("    {}", patch_file.display());
        }
        for error in &r.errors {
            println!("    {error}");
        }
    }
    let (status, summary) = reduce_fixes(&results);
    Ok(finish(status, &summary, &written))
}

pub fn generate_tests(ctx: &Context) -> Result<StepStatus, WorkflowError> {
    let audit = ctx.audit_config()?;
    let generator = TestGenerator::new(&ctx.paths.generated_tests_dir);
    let (results, written) = generator.run_and_report(&audit, &ctx.writer())?;
    for r in &results {
        match r.error {
            Some(ref error) => println!("✗ {:<32} {error}", r.service),
            None => println!(
                "✓ {:<32} {} files, {} scenarios",
                r.service,
                r.templates.len(),
                r.coverage.scenarios.len()
            ),
        }
    }
    let (status, summary) = reduce_tests(&results);
    Ok(finish(status, &summary, &written))
}

pub fn workflow(
    ctx: &Context,
    preset: Option<Preset>,
    steps: Vec<WorkflowStep>,
    format: &str,
) -> Result<StepStatus, WorkflowError> {
    let audit = ctx.audit_config()?;
    let mut options = match preset {
        Some(preset) => preset.options(),
        None => WorkflowOptions::from_config(&ctx.config),
    };
    if !steps.is_empty() {
        options = options.with_steps(steps);
    }
    let console = format == "console";
    options = options.with_print_summary(console);

    let outcome = WorkflowRunner::new(&audit, &ctx.config, &ctx.paths).execute(&options);
    if !console {
        if let Some(reporter) = create_reporter(format) {
            println!("{}", reporter.generate(&outcome.results)?);
        }
    }
    if let Some(ref report) = outcome.report {
        println!("Report: {}", report.json.display());
    }

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
    Ok(outcome.overall_status())
}
