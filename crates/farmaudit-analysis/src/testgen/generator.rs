//! TestGenerator: writes skeleton suites for every configured target.

use std::path::{Path, PathBuf};

use farmaudit_core::errors::{TestGenError, WorkflowError};
use farmaudit_core::types::report_timestamp;
use farmaudit_core::AuditConfig;

use super::introspect::{extract_hook_names, extract_methods, extract_return_keys};
use super::templates::{
    hook_unit, method_scenarios, property_scenarios, service_integration, service_unit,
    TemplateContext,
};
use super::types::{
    Coverage, GenerationStatus, TestGenReport, TestGenerationResult, TestKind, TestTemplate,
};
use crate::audit::TargetKind;
use crate::reporters::{ReportWriter, WrittenReport};
use crate::source::{display_name, SourceFile};

pub struct TestGenerator {
    output_dir: PathBuf,
}

impl TestGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Generate suites for every configured service, then every hook.
    pub fn run(&self, config: &AuditConfig) -> Result<Vec<TestGenerationResult>, TestGenError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| TestGenError::OutputDir {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut results = Vec::with_capacity(config.target_count());
        for path in &config.services {
            results.push(self.generate(path, TargetKind::Service)?);
        }
        for path in &config.hooks {
            results.push(self.generate(path, TargetKind::Hook)?);
        }

        tracing::info!(
            targets = results.len(),
            failed = results.iter().filter(|r| r.is_failed()).count(),
            output = %self.output_dir.display(),
            "test generation complete"
        );
        Ok(results)
    }

    /// Render and write the suites for one target. A missing target is a
    /// failed result; write failures are errors.
    pub fn generate(
        &self,
        path: &Path,
        kind: TargetKind,
    ) -> Result<TestGenerationResult, TestGenError> {
        let Some(source) = SourceFile::read(path) else {
            tracing::warn!(file = %path.display(), "test target not found");
            return Ok(TestGenerationResult {
                service: display_name(path),
                target_file: path.to_path_buf(),
                kind,
                templates: Vec::new(),
                coverage: Coverage::default(),
                status: GenerationStatus::Failed,
                error: Some(format!("File not found: {}", path.display())),
            });
        };

        let ctx = TemplateContext::new(&source.name, &source.path, &self.output_dir);
        let (templates, coverage) = match kind {
            TargetKind::Service => {
                let methods = extract_methods(&source.content);
                let templates = vec![
                    self.template(&source.name, TestKind::Unit, service_unit(&ctx, &methods)),
                    self.template(
                        &source.name,
                        TestKind::Integration,
                        service_integration(&ctx, &methods),
                    ),
                ];
                let scenarios = methods.iter().flat_map(|m| method_scenarios(m)).collect();
                let coverage = Coverage {
                    methods,
                    hooks: Vec::new(),
                    scenarios,
                };
                (templates, coverage)
            }
            TargetKind::Hook => {
                let hooks = extract_hook_names(&source.content);
                let properties = extract_return_keys(&source.content);
                let templates = vec![self.template(
                    &source.name,
                    TestKind::Unit,
                    hook_unit(&ctx, &hooks, &properties),
                )];
                let scenarios = properties
                    .iter()
                    .flat_map(|p| property_scenarios(p))
                    .collect();
                let coverage = Coverage {
                    methods: properties,
                    hooks,
                    scenarios,
                };
                (templates, coverage)
            }
        };

        for template in &templates {
            std::fs::write(&template.file_path, &template.content).map_err(|e| {
                TestGenError::Write {
                    path: template.file_path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
        }
        tracing::debug!(
            service = %source.name,
            files = templates.len(),
            scenarios = coverage.scenarios.len(),
            "generated tests"
        );

        Ok(TestGenerationResult {
            service: source.name,
            target_file: source.path,
            kind,
            templates,
            coverage,
            status: GenerationStatus::Success,
            error: None,
        })
    }

    fn template(&self, name: &str, kind: TestKind, content: String) -> TestTemplate {
        TestTemplate {
            kind,
            file_path: self.output_dir.join(format!("{name}{}", kind.file_suffix())),
            content,
        }
    }

    /// Assemble the report document for a set of results.
    pub fn report(&self, results: &[TestGenerationResult]) -> TestGenReport {
        TestGenReport {
            timestamp: report_timestamp(),
            output_dir: self.output_dir.clone(),
            files_written: results.iter().map(|r| r.templates.len()).sum(),
            results: results.to_vec(),
        }
    }

    /// Generate everything and write the timestamped JSON + Markdown report.
    pub fn run_and_report(
        &self,
        config: &AuditConfig,
        writer: &ReportWriter,
    ) -> Result<(Vec<TestGenerationResult>, WrittenReport), WorkflowError> {
        let results = self.run(config)?;
        let written = writer.write(&self.report(&results))?;
        Ok((results, written))
    }
}
