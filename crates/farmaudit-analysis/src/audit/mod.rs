//! Service pattern auditor.
//!
//! Scores each configured service and hook file against a fixed battery of
//! textual checks plus the configured required/forbidden literals.

pub mod auditor;
pub mod checks;
pub mod markers;
pub mod types;

pub use auditor::ServiceAuditor;
pub use checks::{Check, COMMON_CHECKS, HOOK_CHECKS, SERVICE_CHECKS};
pub use markers::{Marker, MarkerSet};
pub use types::{AuditReport, AuditResult, Gap, GapType, GoldenBaseline, ScoreTally, TargetKind};
