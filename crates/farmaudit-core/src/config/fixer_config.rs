//! Pattern fixer configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_BROADCAST_IMPORT;

/// How patches are written back when auto-apply is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
    /// Patch an in-memory buffer and write only if every patch applied.
    #[default]
    Atomic,
    /// Attempt each patch independently and keep the ones that applied.
    Sequential,
}

impl ApplyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::Sequential => "sequential",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atomic" => Some(Self::Atomic),
            "sequential" | "partial" => Some(Self::Sequential),
            _ => None,
        }
    }
}

impl fmt::Display for ApplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the pattern fixer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FixerConfig {
    /// Rewrite source files in place. Default: false.
    pub auto_apply: Option<bool>,
    /// Apply mode when `auto_apply` is on. Default: atomic.
    pub apply_mode: Option<ApplyMode>,
    /// Import statement inserted by the broadcast fix.
    pub broadcast_import: Option<String>,
}

impl FixerConfig {
    pub fn effective_auto_apply(&self) -> bool {
        self.auto_apply.unwrap_or(false)
    }

    pub fn effective_apply_mode(&self) -> ApplyMode {
        self.apply_mode.unwrap_or_default()
    }

    pub fn effective_broadcast_import(&self) -> &str {
        self.broadcast_import
            .as_deref()
            .unwrap_or(DEFAULT_BROADCAST_IMPORT)
    }
}
