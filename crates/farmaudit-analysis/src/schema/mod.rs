//! Schema validator: checks service field references against the SQL schema.

pub mod field_extractor;
pub mod known_mappings;
pub mod sql_parser;
pub mod types;
pub mod validator;

pub use field_extractor::extract_service_fields;
pub use known_mappings::{known_mapping, KnownMapping, KNOWN_PROBLEMATIC_MAPPINGS};
pub use sql_parser::{parse_schema, ParsedSchema, SchemaTable};
pub use types::{
    MismatchType, SchemaField, SchemaMismatch, SchemaReport, ServiceField, ValidationResult,
};
pub use validator::SchemaValidator;
