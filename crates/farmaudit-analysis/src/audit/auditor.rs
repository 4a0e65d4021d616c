//! ServiceAuditor: runs the check battery over every configured target.

use std::path::Path;

use farmaudit_core::errors::ReportError;
use farmaudit_core::types::report_timestamp;
use farmaudit_core::{AuditConfig, Severity, SeverityWeights, StatusThresholds};

use super::checks::{Check, COMMON_CHECKS, HOOK_CHECKS, SERVICE_CHECKS};
use super::markers::MarkerSet;
use super::types::{
    AuditReport, AuditResult, Gap, GapType, GoldenBaseline, ScoreTally, TargetKind,
};
use crate::reporters::{ReportWriter, WrittenReport};
use crate::source::{display_name, line_of, SourceFile};

/// Audits service and hook files against the golden pattern conventions.
pub struct ServiceAuditor<'a> {
    config: &'a AuditConfig,
}

impl<'a> ServiceAuditor<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    /// Audit every configured target, services first, then hooks.
    pub fn run(&self) -> Vec<AuditResult> {
        let services = self
            .config
            .services
            .iter()
            .map(|p| (p, TargetKind::Service));
        let hooks = self.config.hooks.iter().map(|p| (p, TargetKind::Hook));

        let results: Vec<AuditResult> = services
            .chain(hooks)
            .map(|(path, kind)| self.audit_file(path, kind))
            .collect();

        let tally = ScoreTally::from_scores(results.iter().map(|r| (r.score, r.status)));
        tracing::info!(
            total = tally.total,
            pass = tally.pass,
            warning = tally.warning,
            fail = tally.fail,
            "service audit complete"
        );
        results
    }

    /// Audit a single file. A missing file yields a critical result, never an error.
    pub fn audit_file(&self, path: &Path, kind: TargetKind) -> AuditResult {
        let Some(source) = SourceFile::read(path) else {
            tracing::warn!(file = %path.display(), "audit target not found");
            let mut result = Self::finish(
                display_name(path),
                path,
                kind,
                vec![Gap::new(
                    GapType::MissingPattern,
                    Severity::Critical,
                    format!("File not found: {}", path.display()),
                    "Create the file or remove it from the audit configuration",
                )],
            );
            result.score = 0;
            return result;
        };

        let markers = MarkerSet::scan(&source.content);
        let battery = match kind {
            TargetKind::Service => SERVICE_CHECKS,
            TargetKind::Hook => HOOK_CHECKS,
        };
        let mut gaps: Vec<Gap> = battery
            .iter()
            .chain(COMMON_CHECKS)
            .filter(|check| !check.is_satisfied(&markers, &source.content))
            .map(Check::to_gap)
            .collect();
        gaps.extend(self.configured_pattern_gaps(&source.content));

        tracing::debug!(
            file = %path.display(),
            kind = kind.as_str(),
            gaps = gaps.len(),
            "audited file"
        );
        Self::finish(source.name, path, kind, gaps)
    }

    fn configured_pattern_gaps(&self, text: &str) -> Vec<Gap> {
        let patterns = &self.config.patterns;
        let missing = patterns
            .required
            .iter()
            .filter(|p| !text.contains(p.as_str()))
            .map(|p| {
                Gap::new(
                    GapType::MissingPattern,
                    Severity::Medium,
                    format!("Missing required pattern: {p}"),
                    format!("Add `{p}` following the golden pattern"),
                )
            });
        let forbidden = patterns.forbidden.iter().filter_map(|p| {
            let offset = text.find(p.as_str())?;
            Some(
                Gap::new(
                    GapType::IncorrectImplementation,
                    Severity::High,
                    format!("Forbidden pattern found: {p}"),
                    format!("Remove `{p}`"),
                )
                .at(format!("line:{}", line_of(text, offset))),
            )
        });
        missing.chain(forbidden).collect()
    }

    fn finish(service: String, path: &Path, kind: TargetKind, gaps: Vec<Gap>) -> AuditResult {
        let score = SeverityWeights::AUDIT.score(gaps.iter().map(|g| g.severity));
        let has_critical = gaps.iter().any(|g| g.severity == Severity::Critical);
        let status = StatusThresholds::AUDIT.classify(score, has_critical);
        let recommendations = recommendations(&gaps);
        AuditResult {
            service,
            file: path.to_path_buf(),
            kind,
            score,
            gaps,
            status,
            recommendations,
        }
    }

    /// Run the service battery over the golden pattern file.
    pub fn golden_baseline(&self) -> GoldenBaseline {
        let Some(path) = self.config.golden_pattern.as_ref() else {
            return GoldenBaseline::default();
        };
        let Some(source) = SourceFile::read(path) else {
            tracing::warn!(file = %path.display(), "golden pattern file not found");
            return GoldenBaseline {
                file: Some(path.clone()),
                ..GoldenBaseline::default()
            };
        };
        let markers = MarkerSet::scan(&source.content);
        let (satisfied, missing): (Vec<&Check>, Vec<&Check>) = SERVICE_CHECKS
            .iter()
            .chain(COMMON_CHECKS)
            .partition(|c| c.is_satisfied(&markers, &source.content));
        GoldenBaseline {
            file: Some(path.clone()),
            found: true,
            satisfied: satisfied.iter().map(|c| c.id.to_string()).collect(),
            missing: missing.iter().map(|c| c.id.to_string()).collect(),
        }
    }

    /// Assemble the report document for a set of results.
    pub fn report(&self, results: &[AuditResult]) -> AuditReport {
        AuditReport {
            timestamp: report_timestamp(),
            golden: self.golden_baseline(),
            summary: ScoreTally::from_scores(results.iter().map(|r| (r.score, r.status))),
            results: results.to_vec(),
        }
    }

    /// Audit everything and write the timestamped JSON + Markdown report.
    pub fn run_and_report(
        &self,
        writer: &ReportWriter,
    ) -> Result<(Vec<AuditResult>, WrittenReport), ReportError> {
        let results = self.run();
        let written = writer.write(&self.report(&results))?;
        Ok((results, written))
    }
}

/// Critical suggestions first, then high-priority ones.
fn recommendations(gaps: &[Gap]) -> Vec<String> {
    let tagged = |severity: Severity, tag: &'static str| {
        gaps.iter()
            .filter(move |g| g.severity == severity)
            .map(move |g| format!("{tag}: {}", g.suggestion))
    };
    tagged(Severity::Critical, "CRITICAL")
        .chain(tagged(Severity::High, "HIGH PRIORITY"))
        .collect()
}
