//! Source file access shared by every stage.

pub mod walker;

use std::path::{Path, PathBuf};

pub use walker::collect_typescript_files;

/// A source file read fully into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Display name derived from the file stem (`productService.ts` -> `productService`).
    pub name: String,
    pub content: String,
}

impl SourceFile {
    /// Reads the whole file, decoding invalid UTF-8 lossily.
    /// `None` only when the path is missing or the read fails.
    pub fn read(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Some(Self {
            path: path.to_path_buf(),
            name: display_name(path),
            content,
        })
    }
}

/// File stem without TypeScript extensions.
pub fn display_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    for ext in [".tsx", ".ts", ".jsx", ".js"] {
        if let Some(stem) = file_name.strip_suffix(ext) {
            return stem.to_string();
        }
    }
    file_name
}

/// 1-based line number of `offset` within `content`.
pub fn line_of(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    content.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
