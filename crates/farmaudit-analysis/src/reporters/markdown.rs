//! Markdown rendering for every stage report.

use farmaudit_core::errors::ReportError;
use farmaudit_core::Severity;

use super::{Report, Reporter};
use crate::audit::{AuditReport, ScoreTally};
use crate::fixer::{FixReport, FixResult};
use crate::schema::SchemaReport;
use crate::testgen::TestGenReport;
use crate::workflow::{WorkflowReport, WorkflowResult};

fn tally_section(out: &mut String, tally: &ScoreTally) {
    out.push_str("## Summary\n\n");
    out.push_str("| Total | Pass | Warning | Fail | Average score |\n");
    out.push_str("|------:|-----:|--------:|-----:|--------------:|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} | {:.1} |\n\n",
        tally.total,
        tally.pass,
        tally.warning,
        tally.fail,
        tally.average_score,
    ));
}

impl Report for AuditReport {
    fn stem(&self) -> &'static str {
        "service-audit"
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Service Pattern Audit\n\n");
        out.push_str(&format!("Generated: {}\n\n", self.timestamp));
        tally_section(&mut out, &self.summary);

        if let Some(ref golden) = self.golden.file {
            out.push_str("## Golden pattern\n\n");
            if self.golden.found {
                out.push_str(&format!("`{}` satisfies: {}\n", golden.display(), self.golden.satisfied.join(", ")));
                if !self.golden.missing.is_empty() {
                    out.push_str(&format!("\nNot shown by the golden pattern: {}\n", self.golden.missing.join(", ")));
                }
                out.push('\n');
            } else {
                out.push_str(&format!("⚠ `{}` was not found.\n\n", golden.display()));
            }
        }

        out.push_str("## Results\n\n");
        for result in &self.results {
            out.push_str(&format!(
                "### {} ({}) — {} / 100, {}\n\n",
                result.service,
                result.kind,
                result.score,
                result.status,
            ));
            out.push_str(&format!("File: `{}`\n\n", result.file.display()));
            if result.gaps.is_empty() {
                out.push_str("No gaps found.\n\n");
                continue;
            }
            for severity in Severity::descending() {
                for gap in result.gaps.iter().filter(|g| g.severity == *severity) {
                    let location = gap
                        .location
                        .as_deref()
                        .map(|l| format!(" ({l})"))
                        .unwrap_or_default();
                    out.push_str(&format!(
                        "- **{}** `{}` {}{} — {}\n",
                        severity,
                        gap.gap_type,
                        gap.description,
                        location,
                        gap.suggestion,
                    ));
                }
            }
            if !result.recommendations.is_empty() {
                out.push_str("\nRecommendations:\n\n");
                for rec in &result.recommendations {
                    out.push_str(&format!("1. {rec}\n"));
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Report for SchemaReport {
    fn stem(&self) -> &'static str {
        "schema-validation"
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Schema Validation\n\n");
        out.push_str(&format!("Generated: {}\n\n", self.timestamp));
        out.push_str(&format!(
            "Schema: `{}` ({} tables: {})\n\n",
            self.schema_file.display(),
            self.tables.len(),
            self.tables.join(", "),
        ));
        tally_section(&mut out, &self.summary);

        out.push_str("## Results\n\n");
        for result in &self.results {
            out.push_str(&format!(
                "### {} — {} / 100, {}\n\n",
                result.service,
                result.score,
                result.status,
            ));
            if result.mismatches.is_empty() {
                out.push_str("No mismatches.\n\n");
                continue;
            }
            out.push_str("| Severity | Type | Table | Field | Location | Description |\n");
            out.push_str("|----------|------|-------|-------|----------|-------------|\n");
            for m in &result.mismatches {
                let location = m
                    .service_field
                    .as_ref()
                    .map(|f| f.location.as_str())
                    .unwrap_or("-");
                out.push_str(&format!(
                    "| {} | {} | {} | `{}` | {} | {} |\n",
                    m.severity,
                    m.mismatch_type,
                    m.table,
                    m.field,
                    location,
                    m.description,
                ));
            }
            out.push('\n');
        }
        out
    }
}

impl Report for FixReport {
    fn stem(&self) -> &'static str {
        "pattern-fixes"
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Pattern Fixes\n\n");
        out.push_str(&format!("Generated: {}\n\n", self.timestamp));
        out.push_str(&format!(
            "Auto-apply: {} (mode: {}), {} patches across {} files\n\n",
            if self.auto_apply { "on" } else { "off" },
            self.apply_mode,
            self.total_patches,
            self.results.len(),
        ));
        out.push_str("| Service | Patches | Applied | Status | Patch file |\n");
        out.push_str("|---------|--------:|---------|--------|------------|\n");
        for r in &self.results {
            let patch_file = r
                .patch_file
                .as_ref()
                .map(|p| format!("`{}`", p.display()))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                r.service,
                r.patches.len(),
                if r.applied { "yes" } else { "no" },
                r.status,
                patch_file,
            ));
        }
        for r in self.results.iter().filter(|r| !r.errors.is_empty()) {
            out.push_str(&format!("\n### Errors in {}\n\n", r.service));
            for e in &r.errors {
                out.push_str(&format!("- {e}\n"));
            }
        }
        out
    }
}

/// Patch description file for one service.
pub fn patch_file(result: &FixResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Patches for {}\n\n", result.service));
    out.push_str(&format!("File: `{}`\n\n", result.file.display()));
    for (i, patch) in result.patches.iter().enumerate() {
        let line = patch
            .line_number
            .map(|n| format!(" (line {n})"))
            .unwrap_or_default();
        out.push_str(&format!("## {}. {}{}\n\n", i + 1, patch.description, line));
        out.push_str(&format!("Type: `{}`, severity: {}\n\n", patch.patch_type, patch.severity));
        out.push_str(&format!("Original:\n\n```typescript\n{}\n```\n\n", patch.original_code));
        out.push_str(&format!("Fixed:\n\n```typescript\n{}\n```\n\n", patch.fixed_code));
    }
    out
}

impl Report for TestGenReport {
    fn stem(&self) -> &'static str {
        "test-generation"
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Test Generation\n\n");
        out.push_str(&format!("Generated: {}\n\n", self.timestamp));
        out.push_str(&format!(
            "{} files written to `{}`\n\n",
            self.files_written,
            self.output_dir.display(),
        ));
        for r in &self.results {
            out.push_str(&format!("## {} ({})\n\n", r.service, r.kind));
            if let Some(ref error) = r.error {
                out.push_str(&format!("✗ {error}\n\n"));
                continue;
            }
            for t in &r.templates {
                out.push_str(&format!("- `{}`\n", t.file_path.display()));
            }
            if !r.coverage.hooks.is_empty() {
                out.push_str(&format!("\nHooks: {}\n", r.coverage.hooks.join(", ")));
            }
            out.push_str(&format!("\nMethods: {}\n", r.coverage.methods.join(", ")));
            out.push_str(&format!("Scenarios: {}\n\n", r.coverage.scenarios.len()));
        }
        out
    }
}

impl Report for WorkflowReport {
    fn stem(&self) -> &'static str {
        "workflow-report"
    }

    fn timestamp(&self) -> &str {
        &self.timestamp
    }

    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Workflow Report\n\n");
        out.push_str(&format!("Generated: {}\n\n", self.timestamp));
        out.push_str(&format!(
            "Overall: **{}** in {} ms (fail on errors: {}, auto-apply: {})\n\n",
            self.overall_status,
            self.total_duration_ms,
            self.fail_on_errors,
            self.auto_apply,
        ));
        if let Some(step) = self.halted_at {
            out.push_str(&format!("Halted after step `{step}`.\n\n"));
        }
        out.push_str(&render_steps_table(&self.results));
        out
    }
}

fn render_steps_table(results: &[WorkflowResult]) -> String {
    let mut out = String::new();
    out.push_str("| Step | Status | Duration (ms) | Summary |\n");
    out.push_str("|------|--------|--------------:|---------|\n");
    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            r.step,
            r.status,
            r.duration_ms,
            r.summary,
        ));
    }
    out
}

/// Markdown table of step results.
pub struct MarkdownReporter;

impl Reporter for MarkdownReporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn generate(&self, results: &[WorkflowResult]) -> Result<String, ReportError> {
        Ok(render_steps_table(results))
    }
}
