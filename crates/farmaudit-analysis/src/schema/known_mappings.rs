//! snake_case columns whose camelCase mapping has caused data bugs before.

/// A known problematic column mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownMapping {
    pub column: &'static str,
    pub camel: &'static str,
    pub suggestion: &'static str,
}

pub const KNOWN_PROBLEMATIC_MAPPINGS: &[KnownMapping] = &[
    KnownMapping {
        column: "pre_order_deadline",
        camel: "preOrderDeadline",
        suggestion: "Use pre_order_available_date; pre_order_deadline is not populated by the current schema",
    },
    KnownMapping {
        column: "user_id",
        camel: "userId",
        suggestion: "Map user_id to userId explicitly in the service transform instead of reading it raw",
    },
    KnownMapping {
        column: "created_at",
        camel: "createdAt",
        suggestion: "Map created_at to createdAt explicitly in the service transform instead of reading it raw",
    },
    KnownMapping {
        column: "updated_at",
        camel: "updatedAt",
        suggestion: "Map updated_at to updatedAt explicitly in the service transform instead of reading it raw",
    },
];

/// Look up a column in the known problematic mappings.
pub fn known_mapping(column: &str) -> Option<&'static KnownMapping> {
    KNOWN_PROBLEMATIC_MAPPINGS.iter().find(|m| m.column == column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(known_mapping("created_at").map(|m| m.camel), Some("createdAt"));
        assert!(known_mapping("price_cents").is_none());
    }
}
