//! Directory walking for the schema validator, using the `ignore` crate.

use std::path::{Path, PathBuf};

/// Directories never descended into.
pub const DEFAULT_IGNORES: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

/// All `.ts` source files below `dir`, sorted by path.
///
/// Skips declaration files, test files (`*.test.ts`, `*.spec.ts`) and
/// anything under `__tests__`. Respects `.gitignore`.
pub fn collect_typescript_files(dir: &Path) -> Vec<PathBuf> {
    let mut builder = ignore::WalkBuilder::new(dir);
    builder.hidden(false).git_ignore(true).git_exclude(true);

    let mut overrides = ignore::overrides::OverrideBuilder::new(dir);
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!{pattern}/**"));
        let _ = overrides.add(&format!("!{pattern}"));
    }
    if let Ok(built) = overrides.build() {
        builder.overrides(built);
    }

    let mut files: Vec<PathBuf> = builder
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| is_service_source(path))
        .collect();
    files.sort();
    files
}

fn is_service_source(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };
    if !name.ends_with(".ts") || name.ends_with(".d.ts") {
        return false;
    }
    if name.ends_with(".test.ts") || name.ends_with(".spec.ts") {
        return false;
    }
    !path.components().any(|c| c.as_os_str() == "__tests__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_only_service_sources() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("nested")).unwrap();
        std::fs::create_dir_all(root.join("__tests__")).unwrap();
        for name in [
            "b.ts",
            "a.ts",
            "nested/c.ts",
            "types.d.ts",
            "a.test.ts",
            "notes.md",
            "__tests__/d.ts",
        ] {
            std::fs::write(root.join(name), "export {}").unwrap();
        }

        let files = collect_typescript_files(root);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.ts", "b.ts", "nested/c.ts"]);
    }
}
