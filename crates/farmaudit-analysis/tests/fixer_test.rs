//! Pattern fixer: describe-only runs, auto-apply, backups, and stale patches.

mod common;

use common::{Project, PREORDER_SERVICE, WEAK_SERVICE};
use farmaudit_analysis::fixer::{FixerOptions, PatchApplier};
use farmaudit_analysis::{FixPatch, FixStatus, PatchType, PatternFixer, SchemaValidator};
use farmaudit_core::config::ApplyMode;
use farmaudit_core::{FarmauditConfig, Severity};

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn project() -> Project {
    let project = Project::new();
    project.write("src/services/productService.ts", WEAK_SERVICE);
    project.write("src/services/preorderService.ts", PREORDER_SERVICE);
    project
}

fn options(project: &Project, auto_apply: bool) -> FixerOptions {
    FixerOptions::from_config(&FarmauditConfig::default(), &project.paths())
        .with_auto_apply(auto_apply)
}

fn stale_patch(file: &std::path::Path) -> FixPatch {
    FixPatch {
        file: file.to_path_buf(),
        patch_type: PatchType::ServicePattern,
        description: "Inconsistent return format".to_string(),
        original_code: "return staleValue;".to_string(),
        fixed_code: "return { success: true, data: staleValue };".to_string(),
        line_number: Some(3),
        severity: Severity::Medium,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Describe-only
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_describe_only_leaves_sources_untouched() {
    let project = project();
    let audit = project.audit_config(
        &["src/services/productService.ts", "src/services/preorderService.ts"],
        &[],
    );
    let validator = SchemaValidator::load(&project.path("database/schema.sql")).unwrap();
    let results = PatternFixer::new(&audit, &validator, options(&project, false))
        .run()
        .unwrap();

    assert_eq!(results.len(), 2);
    let product = &results[0];
    assert_eq!(product.service, "productService");
    assert_eq!(product.patches.len(), 3);
    assert!(!product.applied);
    assert!(product.backup_path.is_none());
    assert_eq!(product.status, FixStatus::Success);

    let preorder = &results[1];
    let kinds: Vec<PatchType> = preorder.patches.iter().map(|p| p.patch_type).collect();
    assert_eq!(kinds, vec![PatchType::ServicePattern, PatchType::SchemaMapping]);

    assert_eq!(project.read("src/services/productService.ts"), WEAK_SERVICE);
    assert_eq!(project.read("src/services/preorderService.ts"), PREORDER_SERVICE);

    let patch_files = project.files_with_prefix("reports/patches", "productService-patches-");
    assert_eq!(patch_files.len(), 1);
    assert_eq!(product.patch_file.as_deref(), Some(patch_files[0].as_path()));
    let described = std::fs::read_to_string(&patch_files[0]).unwrap();
    assert!(described.contains("return data;"));
}

#[test]
fn test_clean_files_produce_no_result() {
    let project = Project::new();
    project.write("src/services/cartService.ts", common::GOLDEN_SERVICE);
    let audit = project.audit_config(&["src/services/cartService.ts"], &[]);
    let validator = SchemaValidator::from_sql(common::SCHEMA_SQL);
    let results = PatternFixer::new(&audit, &validator, options(&project, true))
        .run()
        .unwrap();
    assert!(results.is_empty());
    assert!(project.files_with_prefix(".farmaudit/backups", "cartService").is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Auto-apply
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_same_named_targets_keep_separate_backups() {
    let project = Project::new();
    let orders_original = format!("// orders\n{WEAK_SERVICE}");
    project.write("src/services/cart/index.ts", WEAK_SERVICE);
    project.write("src/services/orders/index.ts", &orders_original);
    let audit = project.audit_config(
        &["src/services/cart/index.ts", "src/services/orders/index.ts"],
        &[],
    );
    let validator = SchemaValidator::from_sql(common::SCHEMA_SQL);
    let results = PatternFixer::new(&audit, &validator, options(&project, true))
        .run()
        .unwrap();

    assert_eq!(results.len(), 2);
    let cart_backup = results[0].backup_path.as_ref().unwrap();
    let orders_backup = results[1].backup_path.as_ref().unwrap();
    assert_ne!(cart_backup, orders_backup);
    assert_eq!(std::fs::read_to_string(cart_backup).unwrap(), WEAK_SERVICE);
    assert_eq!(std::fs::read_to_string(orders_backup).unwrap(), orders_original);

    let patch_files = project.files_with_prefix("reports/patches", "index-patches-");
    assert_eq!(patch_files.len(), 2);
    assert_ne!(results[0].patch_file, results[1].patch_file);
}

#[test]
fn test_crlf_service_is_fixed_in_place() {
    let project = Project::new();
    let original = WEAK_SERVICE.replace('\n', "\r\n");
    project.write("src/services/productService.ts", &original);
    let audit = project.audit_config(&["src/services/productService.ts"], &[]);
    let validator = SchemaValidator::from_sql(common::SCHEMA_SQL);
    let results = PatternFixer::new(&audit, &validator, options(&project, true))
        .run()
        .unwrap();

    assert_eq!(results[0].status, FixStatus::Success, "{:?}", results[0].errors);
    assert!(results[0].applied);
    let fixed = project.read("src/services/productService.ts");
    assert!(fixed.contains("try {\r\n"));
    assert!(fixed.contains("return { success: true, data: data };"));
    assert!(!fixed.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_auto_apply_rewrites_after_backup() {
    let project = project();
    let audit = project.audit_config(
        &["src/services/productService.ts", "src/services/preorderService.ts"],
        &[],
    );
    let validator = SchemaValidator::load(&project.path("database/schema.sql")).unwrap();
    let results = PatternFixer::new(&audit, &validator, options(&project, true))
        .run()
        .unwrap();

    for result in &results {
        assert_eq!(result.status, FixStatus::Success, "{:?}", result.errors);
        assert!(result.applied);
        let backup = result.backup_path.as_ref().unwrap();
        assert!(backup.starts_with(project.path(".farmaudit/backups")));
    }

    let product = project.read("src/services/productService.ts");
    assert!(product.contains("try {"));
    assert!(product.contains("} catch (error) {"));
    assert!(product.contains("createBroadcastHelper"));
    assert!(product.contains("return { success: true, data: data };"));
    let backup = std::fs::read_to_string(results[0].backup_path.as_ref().unwrap()).unwrap();
    assert_eq!(backup, WEAK_SERVICE);

    let preorder = project.read("src/services/preorderService.ts");
    assert!(preorder.contains("data.pre_order_available_date"));
    assert!(!preorder.contains("pre_order_deadline"));
}

#[test]
fn test_validator_only_files_get_schema_fixes() {
    let project = project();
    let audit = project.audit_config(&["src/services/productService.ts"], &[]);
    let validator = SchemaValidator::load(&project.path("database/schema.sql")).unwrap();
    let results = PatternFixer::new(&audit, &validator, options(&project, false))
        .run()
        .unwrap();

    let preorder = results
        .iter()
        .find(|r| r.service == "preorderService")
        .unwrap();
    assert_eq!(preorder.patches.len(), 1);
    assert_eq!(preorder.patches[0].patch_type, PatchType::SchemaMapping);
}

// ═══════════════════════════════════════════════════════════════════════════
// Stale patches
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_stale_patch_fails_atomically_with_backup() {
    let project = project();
    let file = project.path("src/services/productService.ts");
    let backups = project.path(".farmaudit/backups");
    let good = FixPatch {
        original_code: "return data;".to_string(),
        ..stale_patch(&file)
    };

    let outcome = PatchApplier::new(ApplyMode::Atomic, &backups)
        .apply(&file, &[good, stale_patch(&file)])
        .unwrap();

    assert_eq!(outcome.status, FixStatus::Failed);
    assert!(!outcome.written);
    assert_eq!(outcome.applied_patches, 0);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(project.read("src/services/productService.ts"), WEAK_SERVICE);
    let backup = outcome.backup_path.unwrap();
    assert_eq!(std::fs::read_to_string(backup).unwrap(), WEAK_SERVICE);
}

#[test]
fn test_sequential_mode_applies_what_it_can() {
    let project = project();
    let file = project.path("src/services/productService.ts");
    let good = FixPatch {
        original_code: "return data;".to_string(),
        fixed_code: "return { success: true, data };".to_string(),
        ..stale_patch(&file)
    };

    let outcome = PatchApplier::new(ApplyMode::Sequential, project.path(".farmaudit/backups"))
        .apply(&file, &[stale_patch(&file), good])
        .unwrap();

    assert_eq!(outcome.status, FixStatus::Partial);
    assert!(outcome.written);
    assert_eq!(outcome.applied_patches, 1);
    let content = project.read("src/services/productService.ts");
    assert!(content.contains("return { success: true, data };"));
}

#[test]
fn test_missing_file_cannot_be_backed_up() {
    let project = project();
    let file = project.path("src/services/ghostService.ts");
    let result = PatchApplier::new(ApplyMode::Atomic, project.path(".farmaudit/backups"))
        .apply(&file, &[stale_patch(&file)]);
    assert!(result.is_err());
    assert!(!file.exists());
}
