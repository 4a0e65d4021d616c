//! SchemaValidator: compares service field references to the parsed schema.

use std::path::{Path, PathBuf};

use farmaudit_core::errors::{SchemaError, WorkflowError};
use farmaudit_core::types::report_timestamp;
use farmaudit_core::{Severity, SeverityWeights, StatusThresholds};

use super::field_extractor::extract_service_fields;
use super::known_mappings::known_mapping;
use super::sql_parser::{parse_schema, ParsedSchema};
use super::types::{MismatchType, SchemaMismatch, SchemaReport, ServiceField, ValidationResult};
use crate::audit::ScoreTally;
use crate::reporters::{ReportWriter, WrittenReport};
use crate::source::{collect_typescript_files, display_name, SourceFile};

/// Validates service files against one schema file.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema_file: PathBuf,
    schema: ParsedSchema,
}

impl SchemaValidator {
    /// Read and parse the schema file.
    pub fn load(schema_file: &Path) -> Result<Self, SchemaError> {
        if !schema_file.exists() {
            return Err(SchemaError::SchemaNotFound {
                path: schema_file.display().to_string(),
            });
        }
        let sql = std::fs::read_to_string(schema_file).map_err(|e| SchemaError::Io {
            path: schema_file.display().to_string(),
            message: e.to_string(),
        })?;
        let schema = parse_schema(&sql);
        if schema.tables.is_empty() {
            tracing::warn!(schema = %schema_file.display(), "schema defines no tables");
        }
        tracing::info!(
            schema = %schema_file.display(),
            tables = schema.tables.len(),
            fields = schema.field_count(),
            "schema loaded"
        );
        Ok(Self {
            schema_file: schema_file.to_path_buf(),
            schema,
        })
    }

    /// Build from SQL text directly.
    pub fn from_sql(sql: &str) -> Self {
        Self {
            schema_file: PathBuf::from("<string>"),
            schema: parse_schema(sql),
        }
    }

    /// Validate every `.ts` service file under `dir`.
    pub fn validate_dir(&self, dir: &Path) -> Result<Vec<ValidationResult>, SchemaError> {
        if !dir.is_dir() {
            return Err(SchemaError::ServicesDirNotFound {
                path: dir.display().to_string(),
            });
        }
        let files = collect_typescript_files(dir);
        tracing::debug!(dir = %dir.display(), files = files.len(), "validating services");
        let results: Vec<ValidationResult> = files
            .iter()
            .filter_map(|path| SourceFile::read(path))
            .filter_map(|source| self.validate_source(&source))
            .collect();
        self.log_summary(&results);
        Ok(results)
    }

    /// Validate an explicit list of files. A listed file that does not exist
    /// yields a critical result with score 0.
    pub fn validate_files(&self, files: &[PathBuf]) -> Vec<ValidationResult> {
        let results: Vec<ValidationResult> = files
            .iter()
            .filter_map(|path| match SourceFile::read(path) {
                Some(source) => self.validate_source(&source),
                None => Some(missing_file_result(path)),
            })
            .collect();
        self.log_summary(&results);
        results
    }

    /// Validate one file's contents. `None` when it references no snake_case fields.
    pub fn validate_source(&self, source: &SourceFile) -> Option<ValidationResult> {
        let fields = extract_service_fields(&source.content, &source.name);
        if fields.is_empty() {
            return None;
        }
        let mismatches: Vec<SchemaMismatch> = fields
            .into_iter()
            .filter_map(|field| self.check_field(field))
            .collect();
        Some(finish(source.name.clone(), &source.path, mismatches))
    }

    fn check_field(&self, field: ServiceField) -> Option<SchemaMismatch> {
        let Some(schema_field) = self.schema.find_field(&field.name) else {
            return Some(SchemaMismatch {
                mismatch_type: MismatchType::MissingField,
                severity: Severity::High,
                table: "unknown".to_string(),
                field: field.name.clone(),
                service: field.service.clone(),
                description: format!("Field '{}' not found in any schema table", field.name),
                suggestion: format!(
                    "Check '{}' against {} or add the column",
                    field.name,
                    self.schema_file.display()
                ),
                schema_field: None,
                service_field: Some(field),
            });
        };

        let known = known_mapping(&field.name)?;
        let mapped_ok = field.mapped_to.as_deref().map_or(true, |m| m == known.camel);
        if !mapped_ok {
            return None;
        }
        Some(SchemaMismatch {
            mismatch_type: MismatchType::IncorrectMapping,
            severity: Severity::Critical,
            table: schema_field.table.clone(),
            field: field.name.clone(),
            service: field.service.clone(),
            description: format!(
                "Field mapping issue: {} -> {}",
                field.name,
                field.mapped_to.as_deref().unwrap_or("undefined")
            ),
            suggestion: known.suggestion.to_string(),
            schema_field: Some(schema_field.clone()),
            service_field: Some(field),
        })
    }

    fn log_summary(&self, results: &[ValidationResult]) {
        let tally = ScoreTally::from_scores(results.iter().map(|r| (r.score, r.status)));
        tracing::info!(
            files = tally.total,
            pass = tally.pass,
            warning = tally.warning,
            fail = tally.fail,
            "schema validation complete"
        );
    }

    /// Assemble the report document for a set of results.
    pub fn report(&self, results: &[ValidationResult]) -> SchemaReport {
        SchemaReport {
            timestamp: report_timestamp(),
            schema_file: self.schema_file.clone(),
            tables: self.schema.table_names(),
            summary: ScoreTally::from_scores(results.iter().map(|r| (r.score, r.status))),
            results: results.to_vec(),
        }
    }

    /// Validate `dir` and write the timestamped JSON + Markdown report.
    pub fn run_and_report(
        &self,
        dir: &Path,
        writer: &ReportWriter,
    ) -> Result<(Vec<ValidationResult>, WrittenReport), WorkflowError> {
        let results = self.validate_dir(dir)?;
        let written = writer.write(&self.report(&results))?;
        Ok((results, written))
    }
}

fn finish(service: String, file: &Path, mismatches: Vec<SchemaMismatch>) -> ValidationResult {
    let score = SeverityWeights::SCHEMA.score(mismatches.iter().map(|m| m.severity));
    let has_critical = mismatches.iter().any(|m| m.severity == Severity::Critical);
    ValidationResult {
        service,
        file: file.to_path_buf(),
        status: StatusThresholds::SCHEMA.classify(score, has_critical),
        mismatches,
        score,
    }
}

fn missing_file_result(path: &Path) -> ValidationResult {
    tracing::warn!(file = %path.display(), "service file not found");
    let service = display_name(path);
    let mismatch = SchemaMismatch {
        mismatch_type: MismatchType::MissingField,
        severity: Severity::Critical,
        table: "unknown".to_string(),
        field: String::new(),
        service: service.clone(),
        description: format!("File not found: {}", path.display()),
        suggestion: "Create the file or remove it from the audit configuration".to_string(),
        schema_field: None,
        service_field: None,
    };
    let mut result = finish(service, path, vec![mismatch]);
    result.score = 0;
    result
}
