//! Error handling for farmaudit.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod fix_error;
pub mod report_error;
pub mod schema_error;
pub mod testgen_error;
pub mod workflow_error;

pub use config_error::ConfigError;
pub use error_code::FarmauditErrorCode;
pub use fix_error::FixError;
pub use report_error::ReportError;
pub use schema_error::SchemaError;
pub use testgen_error::TestGenError;
pub use workflow_error::WorkflowError;
