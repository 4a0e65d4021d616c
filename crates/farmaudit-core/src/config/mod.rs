//! Configuration system for farmaudit.
//!
//! Two inputs: the JSON audit target list (`AuditConfig`) and the TOML
//! pipeline config (`FarmauditConfig`), resolved CLI > env > project > user > defaults.

pub mod audit_config;
pub mod farmaudit_config;
pub mod fixer_config;
pub mod paths_config;
pub mod workflow_config;

pub use audit_config::{AuditConfig, PatternLists};
pub use farmaudit_config::{CliOverrides, FarmauditConfig};
pub use fixer_config::{ApplyMode, FixerConfig};
pub use paths_config::{PathsConfig, ResolvedPaths};
pub use workflow_config::WorkflowConfig;
