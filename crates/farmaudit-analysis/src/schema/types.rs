//! Core types for schema validation.

use std::fmt;
use std::path::PathBuf;

use farmaudit_core::{Severity, Status};
use serde::{Deserialize, Serialize};

use crate::audit::ScoreTally;

/// A column declared in a `CREATE TABLE` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub nullable: bool,
    pub table: String,
}

/// A snake_case field reference found in a service file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceField {
    pub name: String,
    pub service: String,
    /// `line:N`, 1-based.
    pub location: String,
    /// camelCase key when the field appears as `camelKey: snake_field`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchType {
    MissingField,
    IncorrectMapping,
    TypeMismatch,
    NamingInconsistency,
}

impl MismatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::IncorrectMapping => "incorrect_mapping",
            Self::TypeMismatch => "type_mismatch",
            Self::NamingInconsistency => "naming_inconsistency",
        }
    }
}

impl fmt::Display for MismatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A disagreement between a service field reference and the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMismatch {
    #[serde(rename = "type")]
    pub mismatch_type: MismatchType,
    pub severity: Severity,
    /// Owning table, or `unknown` when no table defines the field.
    pub table: String,
    pub field: String,
    pub service: String,
    pub description: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_field: Option<SchemaField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_field: Option<ServiceField>,
}

/// Validation outcome for one service file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub service: String,
    pub file: PathBuf,
    pub mismatches: Vec<SchemaMismatch>,
    pub score: u32,
    pub status: Status,
}

impl ValidationResult {
    pub fn has_critical(&self) -> bool {
        self.mismatches
            .iter()
            .any(|m| m.severity == Severity::Critical)
    }

    /// Critical mismatches only.
    pub fn critical(&self) -> impl Iterator<Item = &SchemaMismatch> {
        self.mismatches
            .iter()
            .filter(|m| m.severity == Severity::Critical)
    }
}

/// Everything the validator writes to its report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaReport {
    pub timestamp: String,
    pub schema_file: PathBuf,
    pub tables: Vec<String>,
    pub summary: ScoreTally,
    pub results: Vec<ValidationResult>,
}
