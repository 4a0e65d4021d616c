//! Timestamps embedded in report, patch, and backup file names.

use chrono::Utc;

/// UTC timestamp safe for file names, e.g. `2024-05-01T12-30-00-123Z`.
pub fn report_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}
