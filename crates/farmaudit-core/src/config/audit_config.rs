//! Audit target configuration, loaded from a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Static description of what the auditor checks.
///
/// ```json
/// {
///   "goldenPattern": "src/services/cartService.ts",
///   "services": ["src/services/productService.ts"],
///   "hooks": ["src/hooks/useCart.ts"],
///   "patterns": { "required": ["ValidationMonitor"], "forbidden": ["any;"] }
/// }
/// ```
///
/// Loaded once per run and handed to each stage by reference.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditConfig {
    /// Reference implementation whose conventions the targets are held to.
    pub golden_pattern: Option<PathBuf>,
    pub services: Vec<PathBuf>,
    pub hooks: Vec<PathBuf>,
    pub patterns: PatternLists,
}

/// Extra literal patterns checked on every target.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PatternLists {
    /// Each must appear somewhere in the file.
    pub required: Vec<String>,
    /// None may appear anywhere in the file.
    pub forbidden: Vec<String>,
}

impl AuditConfig {
    /// Load from a JSON file. Relative target paths are resolved against `root`.
    pub fn load(path: &Path, root: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: AuditConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config.resolved(root))
    }

    /// Parse from a JSON string (for testing).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AuditConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty pattern strings, which would match every file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists = [
            ("patterns.required", &self.patterns.required),
            ("patterns.forbidden", &self.patterns.forbidden),
        ];
        for (field, list) in lists {
            if list.iter().any(|p| p.is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "patterns must not be empty strings".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns a copy with every relative path joined onto `root`.
    pub fn resolved(&self, root: &Path) -> Self {
        let join = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        };
        Self {
            golden_pattern: self.golden_pattern.as_ref().map(join),
            services: self.services.iter().map(join).collect(),
            hooks: self.hooks.iter().map(join).collect(),
            patterns: self.patterns.clone(),
        }
    }

    /// Total number of audit targets.
    pub fn target_count(&self) -> usize {
        self.services.len() + self.hooks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_keys() {
        let config = AuditConfig::from_json(
            r#"{
                "goldenPattern": "src/services/cartService.ts",
                "services": ["src/services/productService.ts"],
                "hooks": ["src/hooks/useCart.ts"]
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.golden_pattern,
            Some(PathBuf::from("src/services/cartService.ts"))
        );
        assert_eq!(config.target_count(), 2);
        assert!(config.patterns.required.is_empty());
    }

    #[test]
    fn test_resolve_against_root() {
        let config = AuditConfig::from_json(r#"{"services": ["a.ts", "/abs/b.ts"]}"#).unwrap();
        let resolved = config.resolved(Path::new("/repo"));
        assert_eq!(resolved.services[0], PathBuf::from("/repo/a.ts"));
        assert_eq!(resolved.services[1], PathBuf::from("/abs/b.ts"));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = AuditConfig::from_json(r#"{"patterns": {"required": [""]}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }
}
