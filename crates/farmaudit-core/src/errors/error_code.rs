//! FarmauditErrorCode trait for structured error output.

/// Every error enum implements this to provide a stable code string
/// for reports and CLI output.
pub trait FarmauditErrorCode {
    /// Returns the error code string (e.g., "SCHEMA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const SCHEMA_NOT_FOUND: &str = "SCHEMA_NOT_FOUND";
pub const FIX_ERROR: &str = "FIX_ERROR";
pub const PATCH_NOT_APPLICABLE: &str = "PATCH_NOT_APPLICABLE";
pub const BACKUP_FAILED: &str = "BACKUP_FAILED";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const TESTGEN_ERROR: &str = "TESTGEN_ERROR";
pub const STEP_FAILED: &str = "STEP_FAILED";
pub const WORKFLOW_ERROR: &str = "WORKFLOW_ERROR";
