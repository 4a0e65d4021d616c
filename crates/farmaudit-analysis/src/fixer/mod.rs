//! Pattern fixer: turns audit gaps and schema mismatches into literal
//! find/replace patches, describes them, and optionally applies them.

pub mod apply;
pub mod pattern_fixer;
pub mod synthesis;
pub mod types;

pub use apply::{ApplyOutcome, PatchApplier};
pub use pattern_fixer::{FixerOptions, PatternFixer};
pub use synthesis::{FixStrategy, PatchSynthesizer};
pub use types::{FixPatch, FixReport, FixResult, FixStatus, PatchType};
