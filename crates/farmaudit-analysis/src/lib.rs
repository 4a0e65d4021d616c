//! # farmaudit-analysis
//!
//! The audit-and-fix pipeline: service pattern auditor, schema validator,
//! pattern fixer, test generator, and the workflow runner that sequences them.
//! Every stage matches source text with regexes and literal markers; nothing
//! here parses TypeScript.

pub mod audit;
pub mod fixer;
pub mod reporters;
pub mod schema;
pub mod source;
pub mod testgen;
pub mod workflow;

pub use audit::{AuditResult, Gap, GapType, ScoreTally, ServiceAuditor, TargetKind};
pub use fixer::{FixPatch, FixResult, FixStatus, PatchType, PatternFixer};
pub use schema::{SchemaMismatch, SchemaValidator, ValidationResult};
pub use testgen::{TestGenerationResult, TestGenerator};
pub use workflow::{WorkflowOptions, WorkflowOutcome, WorkflowResult, WorkflowRunner};
