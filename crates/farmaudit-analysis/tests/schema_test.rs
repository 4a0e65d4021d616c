//! Schema validator over a services directory.

mod common;

use common::{Project, GOLDEN_SERVICE, ORDER_SERVICE, PREORDER_SERVICE, SCHEMA_SQL};
use farmaudit_analysis::reporters::ReportWriter;
use farmaudit_analysis::schema::MismatchType;
use farmaudit_analysis::SchemaValidator;
use farmaudit_core::errors::SchemaError;
use farmaudit_core::{Severity, Status};

#[test]
fn test_repeated_timestamp_reads_fail_without_dedup() {
    let project = Project::new();
    project.write("src/services/orderService.ts", ORDER_SERVICE);
    let validator = SchemaValidator::load(&project.path("database/schema.sql")).unwrap();

    let results = validator
        .validate_dir(&project.path("src/services"))
        .unwrap();
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.service, "orderService");
    assert_eq!(result.mismatches.len(), 3);
    for mismatch in &result.mismatches {
        assert_eq!(mismatch.mismatch_type, MismatchType::IncorrectMapping);
        assert_eq!(mismatch.severity, Severity::Critical);
        assert_eq!(mismatch.field, "created_at");
        assert_eq!(mismatch.table, "products");
        assert_eq!(mismatch.description, "Field mapping issue: created_at -> undefined");
    }
    assert_eq!(result.score, 10);
    assert_eq!(result.status, Status::Fail);

    let lines: Vec<&str> = result
        .mismatches
        .iter()
        .filter_map(|m| m.service_field.as_ref())
        .map(|f| f.location.as_str())
        .collect();
    assert_eq!(lines, vec!["line:12", "line:13", "line:14"]);
}

#[test]
fn test_files_without_fields_are_skipped() {
    let project = Project::new();
    project.write("src/services/cartService.ts", GOLDEN_SERVICE);
    project.write("src/services/preorderService.ts", PREORDER_SERVICE);
    let validator = SchemaValidator::from_sql(SCHEMA_SQL);

    let results = validator
        .validate_dir(&project.path("src/services"))
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].service, "preorderService");
    assert_eq!(results[0].mismatches[0].field, "pre_order_deadline");
    assert!(results[0].has_critical());
}

#[test]
fn test_walk_skips_tests_and_declarations() {
    let project = Project::new();
    project.write("src/services/orderService.ts", ORDER_SERVICE);
    project.write("src/services/orderService.test.ts", ORDER_SERVICE);
    project.write("src/services/__tests__/orderService.ts", ORDER_SERVICE);
    project.write("src/services/types.d.ts", "export type Row = { created_at: string };\n");
    project.write("src/services/nested/legacyService.ts", "const x = row.legacy_flag;\n");
    let validator = SchemaValidator::from_sql(SCHEMA_SQL);

    let results = validator
        .validate_dir(&project.path("src/services"))
        .unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.service.as_str()).collect();
    assert_eq!(names, vec!["legacyService", "orderService"]);

    let legacy = &results[0];
    assert_eq!(legacy.mismatches[0].mismatch_type, MismatchType::MissingField);
    assert_eq!(legacy.mismatches[0].table, "unknown");
    assert_eq!(legacy.score, 80);
    assert_eq!(legacy.status, Status::Warning);
}

#[test]
fn test_missing_schema_and_services_dir() {
    let project = Project::new();
    let err = SchemaValidator::load(&project.path("database/missing.sql")).unwrap_err();
    assert!(matches!(err, SchemaError::SchemaNotFound { .. }));

    let validator = SchemaValidator::from_sql(SCHEMA_SQL);
    let err = validator
        .validate_dir(&project.path("src/nowhere"))
        .unwrap_err();
    assert!(matches!(err, SchemaError::ServicesDirNotFound { .. }));
}

#[test]
fn test_listed_missing_file_scores_zero() {
    let project = Project::new();
    let validator = SchemaValidator::from_sql(SCHEMA_SQL);
    let results = validator.validate_files(&[project.path("src/services/ghostService.ts")]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 0);
    assert_eq!(results[0].status, Status::Fail);
    assert_eq!(results[0].mismatches[0].severity, Severity::Critical);
}

#[test]
fn test_validation_is_idempotent() {
    let project = Project::new();
    project.write("src/services/orderService.ts", ORDER_SERVICE);
    project.write("src/services/preorderService.ts", PREORDER_SERVICE);
    let validator = SchemaValidator::from_sql(SCHEMA_SQL);
    let dir = project.path("src/services");
    assert_eq!(
        validator.validate_dir(&dir).unwrap(),
        validator.validate_dir(&dir).unwrap()
    );
}

#[test]
fn test_report_lists_tables() {
    let project = Project::new();
    project.write("src/services/orderService.ts", ORDER_SERVICE);
    let validator = SchemaValidator::load(&project.path("database/schema.sql")).unwrap();
    let writer = ReportWriter::new(project.path("reports"));
    let (results, written) = validator
        .run_and_report(&project.path("src/services"), &writer)
        .unwrap();

    assert_eq!(results.len(), 1);
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&written.json).unwrap()).unwrap();
    assert_eq!(json["tables"], serde_json::json!(["products", "orders"]));
    assert_eq!(json["summary"]["fail"], 1);
    assert_eq!(json["results"][0]["mismatches"][0]["type"], "incorrect_mapping");
}
