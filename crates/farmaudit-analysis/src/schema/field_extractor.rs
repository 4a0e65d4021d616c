//! Textual extraction of snake_case field references from service source.

use std::sync::LazyLock;

use regex::Regex;

use super::types::ServiceField;
use crate::source::line_of;

/// `.member` access with a lowercase member name.
static RE_MEMBER_ACCESS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\.([a-z][a-z0-9_]*)\b").ok());

/// `camelKey: snake_field` with a bare snake_case value.
static RE_CAMEL_MAPPING: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b([a-z][a-z0-9]*[A-Z][A-Za-z0-9]*)\s*:\s*([a-z][a-z0-9]*(?:_[a-z0-9]+)+)\b").ok()
});

/// `camelKey:` immediately before a member access.
static RE_KEY_PREFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([a-z][a-z0-9]*[A-Z][A-Za-z0-9]*)\s*:\s*$").ok());

/// Globals whose members are never table columns.
const EXCLUDED_OBJECTS: &[&str] = &["console", "JSON", "Date", "Math", "Object", "Array"];

/// Every snake_case field reference in `text`, in source order.
///
/// Two shapes are recognized: `object.snake_field` and
/// `camelKey: snake_field`. Each textual occurrence yields one field.
pub fn extract_service_fields(text: &str, service: &str) -> Vec<ServiceField> {
    let mut found: Vec<(usize, ServiceField)> = Vec::new();

    if let Some(re) = RE_MEMBER_ACCESS.as_ref() {
        for caps in re.captures_iter(text) {
            let (Some(whole), Some(field)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if !field.as_str().contains('_') {
                continue;
            }
            let Some(object_start) = object_before(text, whole.start()) else {
                continue;
            };
            let object = &text[object_start..whole.start()];
            let object = object.trim_end_matches('?');
            if EXCLUDED_OBJECTS.contains(&object) {
                continue;
            }
            found.push((
                field.start(),
                ServiceField {
                    name: field.as_str().to_string(),
                    service: service.to_string(),
                    location: format!("line:{}", line_of(text, field.start())),
                    mapped_to: mapping_key_before(text, object_start),
                },
            ));
        }
    }

    if let Some(re) = RE_CAMEL_MAPPING.as_ref() {
        for caps in re.captures_iter(text) {
            let (Some(key), Some(field)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            found.push((
                field.start(),
                ServiceField {
                    name: field.as_str().to_string(),
                    service: service.to_string(),
                    location: format!("line:{}", line_of(text, field.start())),
                    mapped_to: Some(key.as_str().to_string()),
                },
            ));
        }
    }

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, f)| f).collect()
}

/// Start of the identifier ending right before the dot at `dot`, allowing
/// optional chaining (`obj?.field`).
fn object_before(text: &str, dot: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut end = dot;
    if end > 0 && bytes[end - 1] == b'?' {
        end -= 1;
    }
    let mut start = end;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    if start == end || bytes[start].is_ascii_digit() {
        return None;
    }
    Some(start)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// The camelCase key of a `key: object.field` pair on the same line.
fn mapping_key_before(text: &str, object_start: usize) -> Option<String> {
    let line_start = text[..object_start].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &text[line_start..object_start];
    let caps = RE_KEY_PREFIX.as_ref()?.captures(prefix)?;
    Some(caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(fields: &[ServiceField]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_member_access() {
        let text = "const d = row.created_at;\nconst e = row.name;\nconsole.log_thing();";
        let fields = extract_service_fields(text, "svc");
        assert_eq!(names(&fields), vec!["created_at"]);
        assert_eq!(fields[0].location, "line:1");
        assert_eq!(fields[0].mapped_to, None);
        assert_eq!(fields[0].service, "svc");
    }

    #[test]
    fn test_excluded_objects() {
        let text = "JSON.parse_x(a); Math.max_value; Object.from_entries; item.user_id";
        assert_eq!(names(&extract_service_fields(text, "s")), vec!["user_id"]);
    }

    #[test]
    fn test_camel_mapping() {
        let text = "return {\n  preOrderDeadline: pre_order_deadline,\n  userId: row.user_id,\n};";
        let fields = extract_service_fields(text, "s");
        assert_eq!(names(&fields), vec!["pre_order_deadline", "user_id"]);
        assert_eq!(fields[0].mapped_to.as_deref(), Some("preOrderDeadline"));
        assert_eq!(fields[0].location, "line:2");
        assert_eq!(fields[1].mapped_to.as_deref(), Some("userId"));
        assert_eq!(fields[1].location, "line:3");
    }

    #[test]
    fn test_optional_chaining_and_chains() {
        let text = "a?.created_at; a.b.updated_at";
        assert_eq!(
            names(&extract_service_fields(text, "s")),
            vec!["created_at", "updated_at"]
        );
    }

    #[test]
    fn test_every_occurrence_kept() {
        let text = "x.created_at; y.created_at; z.created_at;";
        assert_eq!(extract_service_fields(text, "s").len(), 3);
    }

    #[test]
    fn test_relative_import_paths_ignored() {
        let text = "import { a } from '../some_dir/thing';";
        assert!(extract_service_fields(text, "s").is_empty());
    }
}
