//! Test generator output on disk.

mod common;

use common::{Project, CART_HOOK, ORDER_SERVICE};
use farmaudit_analysis::reporters::ReportWriter;
use farmaudit_analysis::testgen::{GenerationStatus, TestKind};
use farmaudit_analysis::{TargetKind, TestGenerator};

fn setup() -> (Project, farmaudit_core::AuditConfig) {
    let project = Project::new();
    project.write("src/services/orderService.ts", ORDER_SERVICE);
    project.write("src/hooks/useCart.ts", CART_HOOK);
    let config = project.audit_config(
        &["src/services/orderService.ts", "src/services/ghostService.ts"],
        &["src/hooks/useCart.ts"],
    );
    (project, config)
}

#[test]
fn test_generates_suites_per_target() {
    let (project, config) = setup();
    let out = project.path("src/__tests__/generated");
    let results = TestGenerator::new(&out).run(&config).unwrap();
    assert_eq!(results.len(), 3);

    let service = &results[0];
    assert_eq!(service.kind, TargetKind::Service);
    assert_eq!(service.status, GenerationStatus::Success);
    assert_eq!(service.coverage.methods, vec!["getOrderDates"]);
    assert_eq!(service.coverage.scenarios.len(), 3);
    let kinds: Vec<TestKind> = service.templates.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TestKind::Unit, TestKind::Integration]);

    let unit = std::fs::read_to_string(out.join("orderService.test.ts")).unwrap();
    assert!(unit.contains("getOrderDates"));
    assert!(unit.contains("../../services/orderService"));
    assert!(out.join("orderService.integration.test.ts").exists());

    let hook = &results[2];
    assert_eq!(hook.kind, TargetKind::Hook);
    assert_eq!(hook.coverage.hooks, vec!["useCart"]);
    assert_eq!(hook.coverage.methods, vec!["items", "isLoading", "addItem"]);
    assert_eq!(hook.templates.len(), 1);
    let hook_suite = std::fs::read_to_string(out.join("useCart.test.ts")).unwrap();
    assert!(hook_suite.contains("useCart"));
}

#[test]
fn test_missing_target_fails_alone() {
    let (project, config) = setup();
    let results = TestGenerator::new(project.path("generated"))
        .run(&config)
        .unwrap();

    let ghost = &results[1];
    assert!(ghost.is_failed());
    assert!(ghost.templates.is_empty());
    assert!(ghost.error.as_deref().unwrap().starts_with("File not found"));
    assert!(!results[0].is_failed());
    assert!(!results[2].is_failed());
}

#[test]
fn test_regeneration_overwrites() {
    let (project, config) = setup();
    let generator = TestGenerator::new(project.path("generated"));
    let first = generator.run(&config).unwrap();
    let second = generator.run(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_report_counts_files() {
    let (project, config) = setup();
    let generator = TestGenerator::new(project.path("generated"));
    let writer = ReportWriter::new(project.path("reports"));
    let (_, written) = generator.run_and_report(&config, &writer).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&written.json).unwrap()).unwrap();
    assert_eq!(json["files_written"], 3);
    assert_eq!(json["results"][1]["status"], "failed");
}
