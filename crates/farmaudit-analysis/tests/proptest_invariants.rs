//! Property-based tests for scoring and extraction invariants.
//!
//! Uses proptest to fuzz-verify:
//!   - audit and schema scores stay in [0, 100]
//!   - status is a pure function of score and critical findings
//!   - every snake_case member access is reported, never deduplicated
//!   - marker detection agrees with plain substring search

use proptest::prelude::*;

use farmaudit_analysis::audit::markers::{Marker, MarkerSet};
use farmaudit_analysis::schema::extract_service_fields;
use farmaudit_analysis::{SchemaValidator, ServiceAuditor, TargetKind};
use farmaudit_core::{AuditConfig, Severity, SeverityWeights, Status, StatusThresholds};

const SCHEMA: &str = "CREATE TABLE products (\n  id UUID,\n  created_at TIMESTAMPTZ NOT NULL,\n  pre_order_deadline TIMESTAMPTZ\n);\n";

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Critical),
        Just(Severity::High),
        Just(Severity::Medium),
        Just(Severity::Low),
    ]
}

/// Fragments of service code mixed in random order.
fn service_text() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("try {\n"),
        Just("} catch (error) {\n"),
        Just("console.log('x');\n"),
        Just("return { success: true, data };\n"),
        Just("return data;\n"),
        Just("const a = row.created_at;\n"),
        Just("const b = row.pre_order_deadline;\n"),
        Just("const c = row.legacy_flag;\n"),
        Just("import { supabase } from './supabase';\n"),
        Just("interface Row { id: string }\n"),
        Just("/** docs */\n"),
    ];
    prop::collection::vec(fragment, 0..24).prop_map(|parts| parts.concat())
}

// ═══════════════════════════════════════════════════════════════════
// Scoring
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// Deductions never push a score outside [0, 100].
    #[test]
    fn prop_scores_bounded(severities in prop::collection::vec(severity(), 0..40)) {
        for weights in [SeverityWeights::AUDIT, SeverityWeights::SCHEMA] {
            let score = weights.score(severities.iter().copied());
            prop_assert!(score <= 100);
        }
    }

    /// One more finding can only lower the score.
    #[test]
    fn prop_score_monotonic(
        severities in prop::collection::vec(severity(), 0..20),
        extra in severity(),
    ) {
        let before = SeverityWeights::AUDIT.score(severities.iter().copied());
        let after = SeverityWeights::AUDIT
            .score(severities.iter().copied().chain(std::iter::once(extra)));
        prop_assert!(after <= before);
    }

    /// A critical finding always fails, whatever the score.
    #[test]
    fn prop_critical_always_fails(score in 0u32..=100) {
        prop_assert_eq!(StatusThresholds::AUDIT.classify(score, true), Status::Fail);
        prop_assert_eq!(StatusThresholds::SCHEMA.classify(score, true), Status::Fail);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Extraction
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// Each access is its own field, in source order.
    #[test]
    fn prop_every_access_reported(
        head in "[a-z]{1,6}",
        tail in "[a-z]{1,6}",
        n in 1usize..12,
    ) {
        let field = format!("{head}_{tail}");
        let text = format!("const v = row.{field};\n").repeat(n);
        let fields = extract_service_fields(&text, "svc");
        prop_assert_eq!(fields.len(), n);
        for (i, f) in fields.iter().enumerate() {
            prop_assert_eq!(&f.name, &field);
            prop_assert_eq!(&f.location, &format!("line:{}", i + 1));
        }
    }

    /// Validation never panics and its status matches its own score.
    #[test]
    fn prop_validation_consistent(text in service_text()) {
        let validator = SchemaValidator::from_sql(SCHEMA);
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("svc.ts");
        std::fs::write(&path, &text).unwrap();

        for result in validator.validate_files(&[path]) {
            prop_assert!(result.score <= 100);
            prop_assert_eq!(
                result.status,
                StatusThresholds::SCHEMA.classify(result.score, result.has_critical())
            );
        }
    }

    /// Audit results are bounded and repeatable.
    #[test]
    fn prop_audit_consistent(text in service_text()) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("svc.ts");
        std::fs::write(&path, &text).unwrap();
        let config = AuditConfig::default();
        let auditor = ServiceAuditor::new(&config);

        let first = auditor.audit_file(&path, TargetKind::Service);
        prop_assert!(first.score <= 100);
        prop_assert_eq!(
            first.status,
            StatusThresholds::AUDIT.classify(first.score, first.has_critical())
        );
        prop_assert_eq!(first, auditor.audit_file(&path, TargetKind::Service));
    }

    /// Marker scanning sees exactly what `contains` sees.
    #[test]
    fn prop_markers_match_contains(text in service_text()) {
        let markers = MarkerSet::scan(&text);
        prop_assert_eq!(markers.has(Marker::TryBlock), text.contains("try {"));
        prop_assert_eq!(markers.has(Marker::ConsoleLog), text.contains("console.log"));
        prop_assert_eq!(markers.has(Marker::SupabaseLower), text.contains("supabase"));
        prop_assert_eq!(markers.has(Marker::NamedImport), text.contains("import { "));
    }
}
