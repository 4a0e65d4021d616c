//! Filesystem locations used by the pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AUDIT_CONFIG, DEFAULT_BACKUP_DIR, DEFAULT_GENERATED_TESTS_DIR, DEFAULT_REPORTS_DIR,
    DEFAULT_SCHEMA_FILE, DEFAULT_SERVICES_DIR,
};

/// Path settings; relative values are resolved against the project root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathsConfig {
    /// Audit target list (JSON). Default: `automation/audit-config.json`.
    pub audit_config: Option<PathBuf>,
    /// SQL schema source of truth. Default: `database/schema.sql`.
    pub schema_file: Option<PathBuf>,
    /// Directory of service files checked by the schema validator. Default: `src/services`.
    pub services_dir: Option<PathBuf>,
    /// Where reports and patch descriptions land. Default: `reports`.
    pub reports_dir: Option<PathBuf>,
    /// Output directory of the test generator. Default: `src/__tests__/generated`.
    pub generated_tests_dir: Option<PathBuf>,
    /// Backups taken before in-place fixes. Default: `.farmaudit/backups`.
    pub backup_dir: Option<PathBuf>,
}

/// Absolute paths after resolution against a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub audit_config: PathBuf,
    pub schema_file: PathBuf,
    pub services_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub generated_tests_dir: PathBuf,
    pub backup_dir: PathBuf,
}

impl PathsConfig {
    pub fn resolve(&self, root: &Path) -> ResolvedPaths {
        let pick = |value: &Option<PathBuf>, default: &str| {
            let p = value.clone().unwrap_or_else(|| PathBuf::from(default));
            if p.is_absolute() {
                p
            } else {
                root.join(p)
            }
        };
        ResolvedPaths {
            root: root.to_path_buf(),
            audit_config: pick(&self.audit_config, DEFAULT_AUDIT_CONFIG),
            schema_file: pick(&self.schema_file, DEFAULT_SCHEMA_FILE),
            services_dir: pick(&self.services_dir, DEFAULT_SERVICES_DIR),
            reports_dir: pick(&self.reports_dir, DEFAULT_REPORTS_DIR),
            generated_tests_dir: pick(&self.generated_tests_dir, DEFAULT_GENERATED_TESTS_DIR),
            backup_dir: pick(&self.backup_dir, DEFAULT_BACKUP_DIR),
        }
    }

    pub(crate) fn entries(&self) -> [(&'static str, &Option<PathBuf>); 6] {
        [
            ("paths.audit_config", &self.audit_config),
            ("paths.schema_file", &self.schema_file),
            ("paths.services_dir", &self.services_dir),
            ("paths.reports_dir", &self.reports_dir),
            ("paths.generated_tests_dir", &self.generated_tests_dir),
            ("paths.backup_dir", &self.backup_dir),
        ]
    }
}
