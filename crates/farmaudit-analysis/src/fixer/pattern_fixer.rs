//! PatternFixer: audit + validate, synthesize, describe, optionally apply.

use std::io::Write;
use std::path::{Path, PathBuf};

use farmaudit_core::config::{ApplyMode, ResolvedPaths};
use farmaudit_core::errors::{ReportError, WorkflowError};
use farmaudit_core::types::report_timestamp;
use farmaudit_core::{AuditConfig, FarmauditConfig};

use super::apply::{create_unique, PatchApplier};
use super::synthesis::PatchSynthesizer;
use super::types::{FixReport, FixResult, FixStatus};
use crate::audit::{Gap, ServiceAuditor, TargetKind};
use crate::reporters::{markdown, ReportWriter, WrittenReport};
use crate::schema::{SchemaMismatch, SchemaValidator, ValidationResult};
use crate::source::SourceFile;

/// Everything the fixer needs besides the audit targets.
#[derive(Debug, Clone)]
pub struct FixerOptions {
    pub auto_apply: bool,
    pub apply_mode: ApplyMode,
    pub broadcast_import: String,
    pub services_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub backup_dir: PathBuf,
}

impl FixerOptions {
    pub fn from_config(config: &FarmauditConfig, paths: &ResolvedPaths) -> Self {
        Self {
            auto_apply: config.fixer.effective_auto_apply(),
            apply_mode: config.fixer.effective_apply_mode(),
            broadcast_import: config.fixer.effective_broadcast_import().to_string(),
            services_dir: paths.services_dir.clone(),
            reports_dir: paths.reports_dir.clone(),
            backup_dir: paths.backup_dir.clone(),
        }
    }

    pub fn with_auto_apply(mut self, auto_apply: bool) -> Self {
        self.auto_apply = auto_apply;
        self
    }

    fn patches_dir(&self) -> PathBuf {
        self.reports_dir.join("patches")
    }
}

/// One file to fix with the findings that apply to it.
struct FixTarget<'r> {
    file: PathBuf,
    kind: TargetKind,
    gaps: &'r [Gap],
    mismatches: &'r [SchemaMismatch],
}

/// Generates and applies fixes for audited services and hooks.
pub struct PatternFixer<'a> {
    audit: &'a AuditConfig,
    validator: &'a SchemaValidator,
    options: FixerOptions,
}

impl<'a> PatternFixer<'a> {
    pub fn new(audit: &'a AuditConfig, validator: &'a SchemaValidator, options: FixerOptions) -> Self {
        Self {
            audit,
            validator,
            options,
        }
    }

    /// Re-run audit and validation, then fix every file with at least one patch.
    pub fn run(&self) -> Result<Vec<FixResult>, WorkflowError> {
        let audit_results = ServiceAuditor::new(self.audit).run();
        let validation_results = match self.validator.validate_dir(&self.options.services_dir) {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, "schema validation skipped for fixes");
                Vec::new()
            }
        };

        let mut targets: Vec<FixTarget<'_>> = audit_results
            .iter()
            .map(|audit| FixTarget {
                file: audit.file.clone(),
                kind: audit.kind,
                gaps: &audit.gaps,
                mismatches: find_validation(&validation_results, &audit.file)
                    .map_or(&[][..], |v| v.mismatches.as_slice()),
            })
            .collect();
        // Files only the validator saw get schema fixes alone.
        targets.extend(
            validation_results
                .iter()
                .filter(|v| !audit_results.iter().any(|a| same_file(&a.file, &v.file)))
                .map(|v| FixTarget {
                    file: v.file.clone(),
                    kind: TargetKind::Service,
                    gaps: &[],
                    mismatches: v.mismatches.as_slice(),
                }),
        );

        let mut results = Vec::new();
        for target in &targets {
            if let Some(result) = self.fix_target(target)? {
                results.push(result);
            }
        }
        tracing::info!(
            files = results.len(),
            patches = results.iter().map(|r| r.patches.len()).sum::<usize>(),
            auto_apply = self.options.auto_apply,
            "pattern fixes generated"
        );
        Ok(results)
    }

    fn fix_target(&self, target: &FixTarget<'_>) -> Result<Option<FixResult>, ReportError> {
        let Some(source) = SourceFile::read(&target.file) else {
            tracing::debug!(file = %target.file.display(), "skipping missing file");
            return Ok(None);
        };
        let patches = PatchSynthesizer::new(
            &source.path,
            &source.content,
            target.kind,
            &self.options.broadcast_import,
        )
        .synthesize(target.gaps, target.mismatches);
        if patches.is_empty() {
            return Ok(None);
        }

        let mut result = FixResult {
            service: source.name.clone(),
            file: source.path.clone(),
            patches,
            applied: false,
            backup_path: None,
            patch_file: None,
            status: FixStatus::Success,
            errors: Vec::new(),
        };
        result.patch_file = Some(self.write_patch_file(&result)?);

        if self.options.auto_apply {
            self.apply(&mut result);
        }
        Ok(Some(result))
    }

    fn apply(&self, result: &mut FixResult) {
        let applier = PatchApplier::new(self.options.apply_mode, &self.options.backup_dir);
        match applier.apply(&result.file, &result.patches) {
            Ok(outcome) => {
                result.applied = outcome.written;
                result.backup_path = outcome.backup_path;
                result.status = outcome.status;
                result.errors = outcome.errors;
            }
            Err(e) => {
                tracing::error!(file = %result.file.display(), error = %e, "auto-apply failed");
                result.status = FixStatus::Failed;
                result.errors.push(e.to_string());
            }
        }
    }

    /// Write `<reports>/patches/<service>-patches-<timestamp>.md`, suffixed
    /// when two targets share a service name.
    fn write_patch_file(&self, result: &FixResult) -> Result<PathBuf, ReportError> {
        let dir = self.options.patches_dir();
        let stem = format!("{}-patches-{}", result.service, report_timestamp());
        let write_err = |path: &Path, e: std::io::Error| ReportError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let (path, mut file) = create_unique(&dir, &stem, ".md").map_err(|e| write_err(&dir, e))?;
        file.write_all(markdown::patch_file(result).as_bytes())
            .map_err(|e| write_err(&path, e))?;
        Ok(path)
    }

    /// Assemble the report document for a set of results.
    pub fn report(&self, results: &[FixResult]) -> FixReport {
        FixReport {
            timestamp: report_timestamp(),
            auto_apply: self.options.auto_apply,
            apply_mode: self.options.apply_mode,
            total_patches: results.iter().map(|r| r.patches.len()).sum(),
            results: results.to_vec(),
        }
    }

    /// Fix everything and write the timestamped JSON + Markdown report.
    pub fn run_and_report(
        &self,
        writer: &ReportWriter,
    ) -> Result<(Vec<FixResult>, WrittenReport), WorkflowError> {
        let results = self.run()?;
        let written = writer.write(&self.report(&results))?;
        Ok((results, written))
    }
}

fn find_validation<'v>(results: &'v [ValidationResult], file: &Path) -> Option<&'v ValidationResult> {
    results.iter().find(|v| same_file(&v.file, file))
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
