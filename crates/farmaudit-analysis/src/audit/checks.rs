//! The fixed check battery.
//!
//! Each check is a predicate over the scanned markers (and, for the return
//! format check, the raw text). A failing predicate produces one gap.

use std::sync::LazyLock;

use farmaudit_core::Severity;
use regex::Regex;

use super::markers::{Marker, MarkerSet};
use super::types::{Gap, GapType};

/// `{ success: ...` object literal, tolerant of whitespace.
static RE_SUCCESS_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\s*success\s*:").ok());

/// One entry of the check battery.
pub struct Check {
    pub id: &'static str,
    pub gap_type: GapType,
    pub severity: Severity,
    pub description: &'static str,
    pub suggestion: &'static str,
    satisfied: fn(&MarkerSet, &str) -> bool,
}

impl Check {
    /// Whether `text` (with pre-scanned `markers`) passes this check.
    pub fn is_satisfied(&self, markers: &MarkerSet, text: &str) -> bool {
        (self.satisfied)(markers, text)
    }

    pub fn to_gap(&self) -> Gap {
        Gap::new(self.gap_type, self.severity, self.description, self.suggestion)
    }
}

fn has_try_catch(m: &MarkerSet, _: &str) -> bool {
    m.all(&[Marker::TryBlock, Marker::Catch])
}

fn has_broadcast(m: &MarkerSet, _: &str) -> bool {
    m.any(&[Marker::BroadcastLower, Marker::BroadcastUpper])
}

fn has_success_literal(_: &MarkerSet, text: &str) -> bool {
    RE_SUCCESS_LITERAL
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

fn has_logging(m: &MarkerSet, _: &str) -> bool {
    m.any(&[Marker::ConsoleLog, Marker::ConsoleError])
}

fn has_supabase(m: &MarkerSet, _: &str) -> bool {
    m.any(&[Marker::SupabaseLower, Marker::SupabaseUpper])
}

fn has_query_key(m: &MarkerSet, _: &str) -> bool {
    m.any(&[Marker::QueryKeyColon, Marker::QueryKeyAssign])
}

fn has_optimistic_rollback(m: &MarkerSet, _: &str) -> bool {
    m.all(&[Marker::OnMutate, Marker::OnError])
}

fn has_invalidation(m: &MarkerSet, _: &str) -> bool {
    m.has(Marker::InvalidateQueries)
}

fn has_loading_state(m: &MarkerSet, _: &str) -> bool {
    m.any(&[Marker::IsLoading, Marker::IsPending])
}

fn has_types(m: &MarkerSet, _: &str) -> bool {
    m.any(&[Marker::Interface, Marker::TypeKeyword])
}

fn has_doc_comments(m: &MarkerSet, _: &str) -> bool {
    m.any(&[Marker::DocComment, Marker::Star])
}

// Only files that import something, and never in the named form, fail.
fn has_specific_imports(m: &MarkerSet, _: &str) -> bool {
    !m.has(Marker::Import) || m.has(Marker::NamedImport)
}

/// Checks applied to service files.
pub const SERVICE_CHECKS: &[Check] = &[
    Check {
        id: "error-handling",
        gap_type: GapType::MissingErrorHandling,
        severity: Severity::High,
        description: "Missing robust error handling (try/catch)",
        suggestion: "Wrap database calls in try/catch and return { success: false, error } on failure",
        satisfied: has_try_catch,
    },
    Check {
        id: "broadcast",
        gap_type: GapType::MissingPattern,
        severity: Severity::Medium,
        description: "Missing broadcast integration",
        suggestion: "Send cache invalidation broadcasts through createBroadcastHelper after mutations",
        satisfied: has_broadcast,
    },
    Check {
        id: "return-format",
        gap_type: GapType::IncorrectImplementation,
        severity: Severity::Medium,
        description: "Inconsistent return format (expected { success, data })",
        suggestion: "Return { success: true, data } from every public method",
        satisfied: has_success_literal,
    },
    Check {
        id: "logging",
        gap_type: GapType::MissingPattern,
        severity: Severity::Low,
        description: "Missing logging (console.log/console.error)",
        suggestion: "Log operation start and failures with console.log/console.error",
        satisfied: has_logging,
    },
    Check {
        id: "supabase",
        gap_type: GapType::MissingPattern,
        severity: Severity::High,
        description: "Missing Supabase integration",
        suggestion: "Access data through the shared supabase client",
        satisfied: has_supabase,
    },
];

/// Checks applied to hook files.
pub const HOOK_CHECKS: &[Check] = &[
    Check {
        id: "query-key",
        gap_type: GapType::MissingPattern,
        severity: Severity::High,
        description: "Missing query key factory usage (queryKey)",
        suggestion: "Build query keys with the shared query key factory",
        satisfied: has_query_key,
    },
    Check {
        id: "optimistic-updates",
        gap_type: GapType::MissingPattern,
        severity: Severity::Medium,
        description: "Missing optimistic updates with rollback (onMutate/onError)",
        suggestion: "Apply optimistic updates in onMutate and roll back in onError",
        satisfied: has_optimistic_rollback,
    },
    Check {
        id: "cache-invalidation",
        gap_type: GapType::MissingPattern,
        severity: Severity::Medium,
        description: "Missing cache invalidation (invalidateQueries)",
        suggestion: "Invalidate affected queries after a successful mutation",
        satisfied: has_invalidation,
    },
    Check {
        id: "loading-state",
        gap_type: GapType::MissingPattern,
        severity: Severity::Low,
        description: "Missing loading state (isLoading/isPending)",
        suggestion: "Expose isLoading/isPending from the hook",
        satisfied: has_loading_state,
    },
];

/// Checks applied to every target.
pub const COMMON_CHECKS: &[Check] = &[
    Check {
        id: "typescript-types",
        gap_type: GapType::MissingPattern,
        severity: Severity::Medium,
        description: "Missing TypeScript types",
        suggestion: "Declare interfaces or type aliases for inputs and results",
        satisfied: has_types,
    },
    Check {
        id: "documentation",
        gap_type: GapType::MissingPattern,
        severity: Severity::Low,
        description: "Missing documentation comments",
        suggestion: "Document public methods with /** */ comments",
        satisfied: has_doc_comments,
    },
    Check {
        id: "specific-imports",
        gap_type: GapType::InconsistentNaming,
        severity: Severity::Low,
        description: "Non-specific imports",
        suggestion: "Use named imports (import { x } from ...)",
        satisfied: has_specific_imports,
    },
];
