//! Name extraction for test generation. Regex based; no TypeScript parsing.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

/// Declarations whose first capture group is a method name.
static RE_METHODS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // class methods: `async getProducts(id: string): Promise<X> {`
        r"(?m)^\s*(?:(?:public|private|protected|static|async)\s+)*([A-Za-z_$][\w$]*)\s*\([^)]*\)\s*(?::\s*[^{;]+)?\{",
        // function declarations
        r"\bfunction\s*\*?\s*([A-Za-z_$][\w$]*)\s*\(",
        // exported arrow functions
        r"\bexport\s+const\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s*)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::\s*[^=]+)?=>",
        // object literal methods: `getProducts: async () => {`
        r"(?m)^\s*([A-Za-z_$][\w$]*)\s*:\s*(?:async\s*)?\([^)]*\)\s*(?::\s*[^=]+)?=>",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static RE_HOOK_EXPORT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bexport\s+(?:const|function)\s+(use[A-Za-z0-9_$]*)").ok());

static RE_RETURN_OPEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\breturn\s*\{").ok());

static RE_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:async\s+)?([A-Za-z_$][\w$]*)").ok());

/// Never test targets, even when they look like declarations.
const EXCLUDED_NAMES: &[&str] = &[
    "constructor",
    "render",
    "default",
    "if",
    "for",
    "while",
    "switch",
    "catch",
    "return",
    "function",
    "await",
    "typeof",
    "new",
    "else",
    "do",
    "try",
];

/// Method names in source order, deduplicated.
pub fn extract_methods(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();
    for re in RE_METHODS.iter() {
        for caps in re.captures_iter(text) {
            if let Some(name) = caps.get(1) {
                found.push((name.start(), name.as_str().to_string()));
            }
        }
    }
    found.sort_by_key(|(offset, _)| *offset);
    dedup_names(
        found
            .into_iter()
            .map(|(_, name)| name)
            .filter(|name| !EXCLUDED_NAMES.contains(&name.as_str())),
    )
}

/// Exported `use*` hook names in source order.
pub fn extract_hook_names(text: &str) -> Vec<String> {
    let Some(re) = RE_HOOK_EXPORT.as_ref() else {
        return Vec::new();
    };
    dedup_names(re.captures_iter(text).map(|c| c[1].to_string()))
}

/// Keys of every `return { ... }` object literal, in order, deduplicated.
pub fn extract_return_keys(text: &str) -> Vec<String> {
    let (Some(open_re), Some(key_re)) = (RE_RETURN_OPEN.as_ref(), RE_KEY.as_ref()) else {
        return Vec::new();
    };
    let mut keys = Vec::new();
    for m in open_re.find_iter(text) {
        let Some(body) = balanced_body(&text[m.end()..]) else {
            continue;
        };
        for entry in split_top_level(body) {
            let entry = entry.trim();
            if entry.is_empty() || entry.starts_with("...") {
                continue;
            }
            if let Some(caps) = key_re.captures(entry) {
                keys.push(caps[1].to_string());
            }
        }
    }
    dedup_names(keys)
}

/// Text up to the brace closing an already-opened block.
fn balanced_body(rest: &str) -> Option<&str> {
    let mut depth = 1usize;
    for (i, ch) in rest.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas outside nested brackets.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, ch) in body.char_indices() {
        match ch {
            '{' | '(' | '[' => depth += 1,
            '}' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

fn dedup_names<I: IntoIterator<Item = String>>(names: I) -> Vec<String> {
    let mut seen = FxHashSet::default();
    names
        .into_iter()
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_methods() {
        let text = "export class ProductService {\n  constructor() {}\n  async getProducts(): Promise<Product[]> {\n    if (x) {\n    }\n  }\n  static updateStock(id: string) {\n  }\n}\n";
        assert_eq!(extract_methods(text), vec!["getProducts", "updateStock"]);
    }

    #[test]
    fn test_functions_and_arrows() {
        let text = "export async function getCart() {}\nexport const addItem = async (id: string) => {};\nconst helper = (a) => a;\n";
        assert_eq!(extract_methods(text), vec!["getCart", "addItem"]);
    }

    #[test]
    fn test_object_methods_deduplicated() {
        let text = "export const orderService = {\n  getOrders: async () => {},\n  cancel: async (id) => {},\n};\nfunction getOrders() {}\n";
        assert_eq!(extract_methods(text), vec!["getOrders", "cancel"]);
    }

    #[test]
    fn test_hook_names() {
        let text = "export const useCart = () => {};\nexport function useCartTotals() {}\nconst useInternal = 1;";
        assert_eq!(extract_hook_names(text), vec!["useCart", "useCartTotals"]);
    }

    #[test]
    fn test_return_keys() {
        let text = "return {\n  items,\n  total: sum(items),\n  addItem: (i) => { mutate(i) },\n  ...rest,\n  isLoading,\n};\n// later\nreturn { items, clear };";
        assert_eq!(
            extract_return_keys(text),
            vec!["items", "total", "addItem", "isLoading", "clear"]
        );
    }
}
