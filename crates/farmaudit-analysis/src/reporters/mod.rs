//! Reporters: output formats for stage and workflow results.
//!
//! Every stage writes a timestamped JSON + Markdown pair through
//! [`ReportWriter`]. Workflow step results can additionally be rendered by
//! name through [`create_reporter`].

pub mod console;
pub mod json;
pub mod markdown;
pub mod writer;

pub use writer::{Report, ReportWriter, WrittenReport};

use farmaudit_core::errors::ReportError;

use crate::workflow::WorkflowResult;

/// Trait for rendering workflow step results.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, results: &[WorkflowResult]) -> Result<String, ReportError>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "console" => Some(Box::new(console::ConsoleReporter::default())),
        "json" => Some(Box::new(json::JsonReporter)),
        "markdown" | "md" => Some(Box::new(markdown::MarkdownReporter)),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["console", "json", "markdown"]
}
