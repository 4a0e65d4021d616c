//! Shared constants for the farmaudit pipeline.

/// farmaudit version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "farmaudit.toml";

/// Default audit target configuration (JSON).
pub const DEFAULT_AUDIT_CONFIG: &str = "automation/audit-config.json";

/// Default SQL schema file.
pub const DEFAULT_SCHEMA_FILE: &str = "database/schema.sql";

/// Default directory scanned by the schema validator.
pub const DEFAULT_SERVICES_DIR: &str = "src/services";

/// Default reports directory.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Default directory for generated test skeletons.
pub const DEFAULT_GENERATED_TESTS_DIR: &str = "src/__tests__/generated";

/// Default directory for pre-mutation backups.
pub const DEFAULT_BACKUP_DIR: &str = ".farmaudit/backups";

/// Default import inserted by the broadcast fix.
pub const DEFAULT_BROADCAST_IMPORT: &str =
    "import { createBroadcastHelper } from '../utils/broadcastFactory';";

/// Default log filter when `FARMAUDIT_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "farmaudit=info";

/// Environment variable read for log filtering.
pub const LOG_ENV_VAR: &str = "FARMAUDIT_LOG";

// ---- Scoring ----

/// Upper bound of every score.
pub const MAX_SCORE: u32 = 100;

/// Audit stage: at or below this score a result fails.
pub const AUDIT_FAIL_FLOOR: u32 = 50;

/// Audit stage: at or above this score (and no critical gap) a result passes.
pub const AUDIT_PASS_CEILING: u32 = 80;

/// Schema stage: below this score a result fails.
pub const SCHEMA_FAIL_FLOOR: u32 = 60;

/// Schema stage: at or above this score (and no critical mismatch) a result passes.
pub const SCHEMA_PASS_CEILING: u32 = 85;

// ---- Fixer ----

/// Lines after a function signature searched for an existing `try`.
pub const TRY_LOOKAHEAD_LINES: usize = 5;

/// Maximum body lines wrapped by the error-handling fix.
pub const MAX_WRAPPED_LINES: usize = 8;
