//! # farmaudit-core
//!
//! Foundation crate for the farmaudit pipeline.
//! Defines the shared types, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{AuditConfig, FarmauditConfig};
pub use errors::error_code::FarmauditErrorCode;
pub use types::{Severity, SeverityWeights, Status, StatusThresholds, WorkflowStep};
