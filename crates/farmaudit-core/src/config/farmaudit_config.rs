//! Top-level farmaudit configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ApplyMode, FixerConfig, PathsConfig, ResolvedPaths, WorkflowConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;
use crate::types::WorkflowStep;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FARMAUDIT_*`)
/// 3. Project config (`farmaudit.toml` in project root)
/// 4. User config (`~/.farmaudit/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FarmauditConfig {
    pub paths: PathsConfig,
    pub fixer: FixerConfig,
    pub workflow: WorkflowConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub audit_config: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub auto_apply: Option<bool>,
    pub apply_mode: Option<ApplyMode>,
    pub fail_on_errors: Option<bool>,
}

impl FarmauditConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: FarmauditConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &FarmauditConfig) -> Result<(), ConfigError> {
        for (field, value) in config.paths.entries() {
            if value.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        for step in &config.workflow.steps {
            if WorkflowStep::parse_str(step).is_none() {
                return Err(ConfigError::ValidationFailed {
                    field: "workflow.steps".to_string(),
                    message: format!(
                        "unknown step '{step}' (expected audit, validate, fix, test, verify)"
                    ),
                });
            }
        }
        if let Some(ref import) = config.fixer.broadcast_import {
            if !import.trim_start().starts_with("import ") {
                return Err(ConfigError::ValidationFailed {
                    field: "fixer.broadcast_import".to_string(),
                    message: "must be an import statement".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolve every configured path against `root`.
    pub fn resolve_paths(&self, root: &Path) -> ResolvedPaths {
        self.paths.resolve(root)
    }

    /// Returns the user config path: `~/.farmaudit/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".farmaudit").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut FarmauditConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FarmauditConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut FarmauditConfig, other: &FarmauditConfig) {
        // Paths
        let p = &other.paths;
        if p.audit_config.is_some() {
            base.paths.audit_config = p.audit_config.clone();
        }
        if p.schema_file.is_some() {
            base.paths.schema_file = p.schema_file.clone();
        }
        if p.services_dir.is_some() {
            base.paths.services_dir = p.services_dir.clone();
        }
        if p.reports_dir.is_some() {
            base.paths.reports_dir = p.reports_dir.clone();
        }
        if p.generated_tests_dir.is_some() {
            base.paths.generated_tests_dir = p.generated_tests_dir.clone();
        }
        if p.backup_dir.is_some() {
            base.paths.backup_dir = p.backup_dir.clone();
        }

        // Fixer
        if other.fixer.auto_apply.is_some() {
            base.fixer.auto_apply = other.fixer.auto_apply;
        }
        if other.fixer.apply_mode.is_some() {
            base.fixer.apply_mode = other.fixer.apply_mode;
        }
        if other.fixer.broadcast_import.is_some() {
            base.fixer.broadcast_import = other.fixer.broadcast_import.clone();
        }

        // Workflow
        if other.workflow.fail_on_errors.is_some() {
            base.workflow.fail_on_errors = other.workflow.fail_on_errors;
        }
        if !other.workflow.steps.is_empty() {
            base.workflow.steps = other.workflow.steps.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `FARMAUDIT_REPORTS_DIR`, `FARMAUDIT_AUTO_APPLY`, etc.
    fn apply_env_overrides(config: &mut FarmauditConfig) -> Result<(), ConfigError> {
        let path_vars: [(&str, &mut Option<PathBuf>); 6] = [
            ("FARMAUDIT_AUDIT_CONFIG", &mut config.paths.audit_config),
            ("FARMAUDIT_SCHEMA_FILE", &mut config.paths.schema_file),
            ("FARMAUDIT_SERVICES_DIR", &mut config.paths.services_dir),
            ("FARMAUDIT_REPORTS_DIR", &mut config.paths.reports_dir),
            (
                "FARMAUDIT_GENERATED_TESTS_DIR",
                &mut config.paths.generated_tests_dir,
            ),
            ("FARMAUDIT_BACKUP_DIR", &mut config.paths.backup_dir),
        ];
        for (key, slot) in path_vars {
            if let Ok(val) = std::env::var(key) {
                *slot = Some(PathBuf::from(val));
            }
        }
        if let Ok(val) = std::env::var("FARMAUDIT_AUTO_APPLY") {
            if let Ok(v) = val.parse::<bool>() {
                config.fixer.auto_apply = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FARMAUDIT_APPLY_MODE") {
            let mode = ApplyMode::parse_str(&val).ok_or_else(|| ConfigError::InvalidValue {
                field: "FARMAUDIT_APPLY_MODE".to_string(),
                message: format!("'{val}' is not one of atomic, sequential"),
            })?;
            config.fixer.apply_mode = Some(mode);
        }
        if let Ok(val) = std::env::var("FARMAUDIT_FAIL_ON_ERRORS") {
            if let Ok(v) = val.parse::<bool>() {
                config.workflow.fail_on_errors = Some(v);
            }
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FarmauditConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.audit_config {
            config.paths.audit_config = Some(v.clone());
        }
        if let Some(ref v) = cli.reports_dir {
            config.paths.reports_dir = Some(v.clone());
        }
        if let Some(v) = cli.auto_apply {
            config.fixer.auto_apply = Some(v);
        }
        if let Some(v) = cli.apply_mode {
            config.fixer.apply_mode = Some(v);
        }
        if let Some(v) = cli.fail_on_errors {
            config.workflow.fail_on_errors = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
