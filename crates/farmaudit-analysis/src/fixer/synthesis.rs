//! Patch synthesis: one strategy per recognized gap description.

use std::path::Path;
use std::sync::LazyLock;

use farmaudit_core::constants::{MAX_WRAPPED_LINES, TRY_LOOKAHEAD_LINES};
use farmaudit_core::Severity;
use regex::Regex;

use super::types::{FixPatch, PatchType};
use crate::audit::{Gap, TargetKind};
use crate::schema::SchemaMismatch;

/// Function declaration opening a block on the same line: `function f(`,
/// `const f = (...) =>`, or a modified class method such as `async f(`.
/// Call sites like `useEffect(() => {` have no declaration keyword.
static RE_SIGNATURE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?:export\s+)?(?:default\s+)?(?:",
        r"(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)\s*\([^)]*\)",
        r"|(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?:async\s*)?(?:function\s*)?\([^)]*\)",
        r"|(?:(?:public|private|protected|static|async|override)\s+)+\*?([A-Za-z_$][\w$]*)\s*\([^)]*\)",
        r")\s*(?::\s*[^{=]+?)?\s*(?:=>\s*)?\{\s*$",
    ))
    .ok()
});

/// `return <expr>;` on one line.
static RE_RETURN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\breturn\s+([^;]+?)\s*;").ok());

/// Names that look like calls but open control-flow blocks.
const NON_FUNCTIONS: &[&str] = &["if", "for", "while", "switch", "catch", "with", "return"];

const DEPRECATED_COLUMN: &str = "pre_order_deadline";
const REPLACEMENT_COLUMN: &str = "pre_order_available_date";

/// Fix strategy selected from a gap description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStrategy {
    WrapInTryCatch,
    AddBroadcastImport,
    WrapReturnValue,
    AddLogging,
}

impl FixStrategy {
    /// Select by case-insensitive substring of the gap description.
    pub fn for_description(description: &str) -> Option<Self> {
        let lower = description.to_lowercase();
        if lower.contains("error handling") {
            Some(Self::WrapInTryCatch)
        } else if lower.contains("broadcast integration") {
            Some(Self::AddBroadcastImport)
        } else if lower.contains("consistent return format") {
            Some(Self::WrapReturnValue)
        } else if lower.contains("logging") {
            Some(Self::AddLogging)
        } else {
            None
        }
    }
}

/// A function signature line found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Signature {
    /// 0-based line index.
    index: usize,
    name: String,
}

/// Synthesizes patches for one file's content.
pub struct PatchSynthesizer<'a> {
    file: &'a Path,
    content: &'a str,
    lines: Vec<&'a str>,
    /// Line terminator of the file, reused in multi-line patches.
    eol: &'static str,
    patch_type: PatchType,
    broadcast_import: &'a str,
}

impl<'a> PatchSynthesizer<'a> {
    pub fn new(
        file: &'a Path,
        content: &'a str,
        kind: TargetKind,
        broadcast_import: &'a str,
    ) -> Self {
        let patch_type = match kind {
            TargetKind::Service => PatchType::ServicePattern,
            TargetKind::Hook => PatchType::HookPattern,
        };
        Self {
            file,
            content,
            lines: content.lines().collect(),
            eol: if content.contains("\r\n") { "\r\n" } else { "\n" },
            patch_type,
            broadcast_import,
        }
    }

    /// Patches for every gap and critical mismatch, in input order.
    pub fn synthesize(&self, gaps: &[Gap], mismatches: &[SchemaMismatch]) -> Vec<FixPatch> {
        let mut patches: Vec<FixPatch> = gaps.iter().filter_map(|g| self.for_gap(g)).collect();
        patches.extend(mismatches.iter().filter_map(|m| self.for_mismatch(m)));
        patches
    }

    /// Patch for one audit gap, if its description is recognized.
    pub fn for_gap(&self, gap: &Gap) -> Option<FixPatch> {
        let strategy = FixStrategy::for_description(&gap.description)?;
        let (original, fixed, line) = match strategy {
            FixStrategy::WrapInTryCatch => self.wrap_in_try_catch()?,
            FixStrategy::AddBroadcastImport => self.add_broadcast_import()?,
            FixStrategy::WrapReturnValue => self.wrap_return_value()?,
            FixStrategy::AddLogging => self.add_logging()?,
        };
        Some(self.patch(self.patch_type, &gap.description, original, fixed, line, gap.severity))
    }

    /// Patch for a critical mismatch on the deprecated pre-order column.
    pub fn for_mismatch(&self, mismatch: &SchemaMismatch) -> Option<FixPatch> {
        if mismatch.severity != Severity::Critical || mismatch.field != DEPRECATED_COLUMN {
            return None;
        }
        let line = mismatch
            .service_field
            .as_ref()
            .and_then(|f| f.location.strip_prefix("line:"))
            .and_then(|n| n.parse().ok());
        Some(self.patch(
            PatchType::SchemaMapping,
            &format!("Replace {DEPRECATED_COLUMN} with {REPLACEMENT_COLUMN}"),
            DEPRECATED_COLUMN.to_string(),
            REPLACEMENT_COLUMN.to_string(),
            line,
            mismatch.severity,
        ))
    }

    fn patch(
        &self,
        patch_type: PatchType,
        description: &str,
        original_code: String,
        fixed_code: String,
        line_number: Option<usize>,
        severity: Severity,
    ) -> FixPatch {
        FixPatch {
            file: self.file.to_path_buf(),
            patch_type,
            description: description.to_string(),
            original_code,
            fixed_code,
            line_number,
            severity,
        }
    }

    fn signatures(&self) -> impl Iterator<Item = Signature> + '_ {
        let re = RE_SIGNATURE.as_ref();
        self.lines.iter().enumerate().filter_map(move |(index, line)| {
            let caps = re?.captures(line)?;
            let name = (1..=3).find_map(|i| caps.get(i))?.as_str().to_string();
            if NON_FUNCTIONS.contains(&name.as_str()) {
                return None;
            }
            Some(Signature { index, name })
        })
    }

    /// Wrap the body of the first function without a nearby `try`.
    fn wrap_in_try_catch(&self) -> Option<(String, String, Option<usize>)> {
        let sig = self.signatures().find(|sig| {
            let end = (sig.index + 1 + TRY_LOOKAHEAD_LINES).min(self.lines.len());
            !self.lines[sig.index + 1..end]
                .iter()
                .any(|l| l.contains("try"))
        })?;

        let sig_indent = indent_of(self.lines[sig.index]);
        let body: Vec<&str> = self.lines[sig.index + 1..]
            .iter()
            .take_while(|l| {
                let t = l.trim_start();
                !(t.starts_with('}') && indent_of(l).len() <= sig_indent.len())
            })
            .take(MAX_WRAPPED_LINES)
            .copied()
            .collect();
        if body.iter().all(|l| l.trim().is_empty()) {
            return None;
        }

        let eol = self.eol;
        let indent = indent_of(body.iter().find(|l| !l.trim().is_empty())?);
        let mut fixed = format!("{indent}try {{{eol}");
        for line in &body {
            if line.trim().is_empty() {
                fixed.push_str(eol);
            } else {
                fixed.push_str(&format!("  {line}{eol}"));
            }
        }
        fixed.push_str(&format!("{indent}}} catch (error) {{{eol}"));
        fixed.push_str(&format!("{indent}  console.error('{} failed:', error);{eol}", sig.name));
        fixed.push_str(&format!("{indent}  return {{ success: false, error }};{eol}"));
        fixed.push_str(&format!("{indent}}}"));

        Some((body.join(eol), fixed, Some(sig.index + 2)))
    }

    /// Insert the broadcast helper import after the last import statement.
    fn add_broadcast_import(&self) -> Option<(String, String, Option<usize>)> {
        let last_import = self
            .lines
            .iter()
            .rposition(|l| l.trim_start().starts_with("import "));
        let anchor = match last_import {
            // Multi-line imports end at the line carrying `from`.
            Some(start) => self.lines[start..]
                .iter()
                .position(|l| l.contains(" from ") || l.trim_end().ends_with(';'))
                .map_or(start, |offset| start + offset),
            None => {
                let first = self.lines.first()?;
                return Some((
                    first.to_string(),
                    format!("{}{}{first}", self.broadcast_import, self.eol),
                    Some(1),
                ));
            }
        };
        let line = self.lines[anchor];
        Some((
            line.to_string(),
            format!("{line}{}{}", self.eol, self.broadcast_import),
            Some(anchor + 1),
        ))
    }

    /// Wrap the first `return X;` without a `success` key into the envelope.
    fn wrap_return_value(&self) -> Option<(String, String, Option<usize>)> {
        let re = RE_RETURN.as_ref()?;
        let caps = re
            .captures_iter(self.content)
            .find(|c| !c[1].contains("success"))?;
        let whole = caps.get(0)?;
        let value = caps[1].trim();
        Some((
            whole.as_str().to_string(),
            format!("return {{ success: true, data: {value} }};"),
            Some(crate::source::line_of(self.content, whole.start())),
        ))
    }

    /// Log entry into the first function, when the file logs nothing.
    fn add_logging(&self) -> Option<(String, String, Option<usize>)> {
        if self.content.contains("console.log") || self.content.contains("console.error") {
            return None;
        }
        let sig = self.signatures().next()?;
        let line = self.lines[sig.index];
        let indent = indent_of(line);
        Some((
            line.to_string(),
            format!("{line}{}{indent}  console.log('{} called');", self.eol, sig.name),
            Some(sig.index + 1),
        ))
    }
}

fn indent_of(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::GapType;
    use crate::schema::{MismatchType, ServiceField};

    const SERVICE: &str = "import { supabase } from '../config/supabase';\n\nexport async function getProducts() {\n  const data = await supabase.from('products').select('*');\n  return data;\n}\n";

    fn gap(description: &str) -> Gap {
        Gap::new(GapType::MissingPattern, Severity::Medium, description, "")
    }

    fn synth(content: &str) -> PatchSynthesizer<'_> {
        PatchSynthesizer::new(
            Path::new("svc.ts"),
            content,
            TargetKind::Service,
            "import { createBroadcastHelper } from '../utils/broadcastFactory';",
        )
    }

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(
            FixStrategy::for_description("Missing robust error handling (try/catch)"),
            Some(FixStrategy::WrapInTryCatch)
        );
        assert_eq!(
            FixStrategy::for_description("Inconsistent return format (expected { success, data })"),
            Some(FixStrategy::WrapReturnValue)
        );
        assert_eq!(FixStrategy::for_description("Missing Supabase integration"), None);
    }

    #[test]
    fn test_wrap_in_try_catch() {
        let s = synth(SERVICE);
        let patch = s.for_gap(&gap("Missing robust error handling")).unwrap();
        assert_eq!(
            patch.original_code,
            "  const data = await supabase.from('products').select('*');\n  return data;"
        );
        assert!(patch.fixed_code.starts_with("  try {\n    const data"));
        assert!(patch.fixed_code.contains("} catch (error) {"));
        assert!(patch.fixed_code.contains("return { success: false, error };"));
        assert_eq!(patch.line_number, Some(4));
        assert_eq!(patch.patch_type, PatchType::ServicePattern);
    }

    #[test]
    fn test_try_nearby_skips_function() {
        let content = "function a() {\n  try {\n    x();\n  } catch (e) {}\n}\nfunction b() {\n  y();\n}\n";
        let patch = synth(content).for_gap(&gap("error handling")).unwrap();
        assert_eq!(patch.original_code, "  y();");
    }

    #[test]
    fn test_broadcast_import_after_last_import() {
        let patch = synth(SERVICE).for_gap(&gap("Missing broadcast integration")).unwrap();
        assert_eq!(patch.original_code, "import { supabase } from '../config/supabase';");
        assert!(patch.fixed_code.ends_with("from '../utils/broadcastFactory';"));
        assert_eq!(patch.line_number, Some(1));
    }

    #[test]
    fn test_wrap_return_value() {
        let patch = synth(SERVICE).for_gap(&gap("Inconsistent return format")).unwrap();
        assert_eq!(patch.original_code, "return data;");
        assert_eq!(patch.fixed_code, "return { success: true, data: data };");
        assert_eq!(patch.line_number, Some(5));
    }

    #[test]
    fn test_object_return_not_wrapped() {
        let content = "function f() {\n  return { success: true };\n}\n";
        assert!(synth(content).for_gap(&gap("consistent return format")).is_none());
    }

    #[test]
    fn test_object_return_without_success_is_wrapped() {
        let content = "function f() {\n  return { success: false };\n  return { data, count };\n}\n";
        let patch = synth(content).for_gap(&gap("consistent return format")).unwrap();
        assert_eq!(patch.original_code, "return { data, count };");
        assert_eq!(patch.fixed_code, "return { success: true, data: { data, count } };");
        assert_eq!(patch.line_number, Some(3));
    }

    #[test]
    fn test_crlf_patches_match_content() {
        let content = SERVICE.replace('\n', "\r\n");
        let s = synth(&content);
        for description in ["Missing robust error handling", "Missing broadcast integration", "Missing logging"] {
            let patch = s.for_gap(&gap(description)).unwrap();
            assert!(content.contains(&patch.original_code), "{description}");
            assert!(!patch.fixed_code.replace("\r\n", "").contains('\n'), "{description}");
        }
        let wrapped = s.for_gap(&gap("error handling")).unwrap();
        assert_eq!(
            wrapped.original_code,
            "  const data = await supabase.from('products').select('*');\r\n  return data;"
        );
    }

    #[test]
    fn test_callbacks_are_not_signatures() {
        let content = "useEffect(() => {\n  load();\n});\nsetTimeout(() => {\n  tick();\n}, 10);\n";
        assert!(synth(content).for_gap(&gap("error handling")).is_none());
        assert!(synth(content).for_gap(&gap("Missing logging")).is_none());
    }

    #[test]
    fn test_declaration_forms_are_signatures() {
        let arrow = "export const useCart = async (id: string) => {\n  load(id);\n};\n";
        let patch = synth(arrow).for_gap(&gap("Missing logging")).unwrap();
        assert!(patch.fixed_code.ends_with("console.log('useCart called');"));

        let method = "class Store {\n  async load() {\n    fetch();\n  }\n}\n";
        let patch = synth(method).for_gap(&gap("error handling")).unwrap();
        assert_eq!(patch.original_code, "    fetch();");

        let inner = "export function outer() {\n  useEffect(() => {\n    go();\n  });\n}\n";
        let patch = synth(inner).for_gap(&gap("Missing logging")).unwrap();
        assert!(patch.fixed_code.contains("'outer called'"));
    }

    #[test]
    fn test_logging_only_when_absent() {
        let patch = synth(SERVICE).for_gap(&gap("Missing logging")).unwrap();
        assert_eq!(patch.original_code, "export async function getProducts() {");
        assert!(patch.fixed_code.ends_with("  console.log('getProducts called');"));

        let logged = format!("{SERVICE}console.log('x');\n");
        assert!(synth(&logged).for_gap(&gap("Missing logging")).is_none());
    }

    #[test]
    fn test_control_flow_not_a_signature() {
        let content = "if (x) {\n  y();\n}\n";
        assert!(synth(content).for_gap(&gap("error handling")).is_none());
    }

    #[test]
    fn test_pre_order_mismatch_patch() {
        let mismatch = SchemaMismatch {
            mismatch_type: MismatchType::IncorrectMapping,
            severity: Severity::Critical,
            table: "products".into(),
            field: "pre_order_deadline".into(),
            service: "svc".into(),
            description: String::new(),
            suggestion: String::new(),
            schema_field: None,
            service_field: Some(ServiceField {
                name: "pre_order_deadline".into(),
                service: "svc".into(),
                location: "line:7".into(),
                mapped_to: None,
            }),
        };
        let patch = synth("").for_mismatch(&mismatch).unwrap();
        assert_eq!(patch.patch_type, PatchType::SchemaMapping);
        assert_eq!(patch.fixed_code, "pre_order_available_date");
        assert_eq!(patch.line_number, Some(7));

        let other = SchemaMismatch {
            field: "created_at".into(),
            ..mismatch
        };
        assert!(synth("").for_mismatch(&other).is_none());
    }
}
