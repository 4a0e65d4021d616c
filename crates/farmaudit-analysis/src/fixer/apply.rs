//! Backup-then-mutate patch application.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use farmaudit_core::config::ApplyMode;
use farmaudit_core::errors::FixError;
use farmaudit_core::types::report_timestamp;

use super::types::{FixPatch, FixStatus};

/// Outcome of applying one file's patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub status: FixStatus,
    /// Whether the file was rewritten.
    pub written: bool,
    pub applied_patches: usize,
    pub backup_path: Option<PathBuf>,
    pub errors: Vec<String>,
}

/// Applies patches to files on disk after taking a timestamped backup.
pub struct PatchApplier {
    mode: ApplyMode,
    backup_dir: PathBuf,
}

impl PatchApplier {
    pub fn new(mode: ApplyMode, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            backup_dir: backup_dir.into(),
        }
    }

    /// Back up `file`, then apply `patches` in list order.
    ///
    /// Patch failures are reported in the outcome. Only backup and I/O
    /// failures are errors; in that case the file is never modified.
    pub fn apply(&self, file: &Path, patches: &[FixPatch]) -> Result<ApplyOutcome, FixError> {
        if patches.is_empty() {
            return Ok(ApplyOutcome {
                status: FixStatus::Success,
                written: false,
                applied_patches: 0,
                backup_path: None,
                errors: Vec::new(),
            });
        }

        let backup_path = create_backup(file, &self.backup_dir)?;
        let bytes = std::fs::read(file).map_err(|e| FixError::Io {
            path: file.display().to_string(),
            message: e.to_string(),
        })?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let (buffer, applied, errors) = match self.mode {
            ApplyMode::Atomic => apply_atomic(file, &content, patches),
            ApplyMode::Sequential => apply_sequential(file, &content, patches),
        };

        let status = if errors.is_empty() {
            FixStatus::Success
        } else if applied > 0 && self.mode == ApplyMode::Sequential {
            FixStatus::Partial
        } else {
            FixStatus::Failed
        };

        let written = match buffer {
            Some(updated) if updated != content => {
                std::fs::write(file, updated).map_err(|e| FixError::Io {
                    path: file.display().to_string(),
                    message: e.to_string(),
                })?;
                true
            }
            _ => false,
        };

        tracing::info!(
            file = %file.display(),
            mode = self.mode.as_str(),
            applied,
            failed = errors.len(),
            status = status.as_str(),
            "patches applied"
        );

        Ok(ApplyOutcome {
            status,
            written,
            applied_patches: applied,
            backup_path: Some(backup_path),
            errors,
        })
    }
}

/// Every patch must apply to the in-memory buffer, or nothing is written.
fn apply_atomic(
    file: &Path,
    content: &str,
    patches: &[FixPatch],
) -> (Option<String>, usize, Vec<String>) {
    let mut buffer = content.to_string();
    for patch in patches {
        if !buffer.contains(&patch.original_code) {
            let err = not_applicable(file, patch);
            tracing::warn!(error = %err, "atomic apply aborted");
            return (None, 0, vec![err.to_string()]);
        }
        buffer = buffer.replacen(&patch.original_code, &patch.fixed_code, 1);
    }
    (Some(buffer), patches.len(), Vec::new())
}

/// Each patch is tried independently against the evolving buffer.
fn apply_sequential(
    file: &Path,
    content: &str,
    patches: &[FixPatch],
) -> (Option<String>, usize, Vec<String>) {
    let mut buffer = content.to_string();
    let mut applied = 0;
    let mut errors = Vec::new();
    for patch in patches {
        if buffer.contains(&patch.original_code) {
            buffer = buffer.replacen(&patch.original_code, &patch.fixed_code, 1);
            applied += 1;
        } else {
            let err = not_applicable(file, patch);
            tracing::warn!(error = %err, "patch skipped");
            errors.push(err.to_string());
        }
    }
    let buffer = (applied > 0).then_some(buffer);
    (buffer, applied, errors)
}

fn not_applicable(file: &Path, patch: &FixPatch) -> FixError {
    FixError::PatchNotApplicable {
        file: file.display().to_string(),
        description: patch.description.clone(),
    }
}

/// Copy `file` to `<backup_dir>/<file name>.<timestamp>.backup`.
///
/// An existing backup is never overwritten; a taken name gets a numeric
/// suffix (`index.ts.<timestamp>.1.backup`).
pub fn create_backup(file: &Path, backup_dir: &Path) -> Result<PathBuf, FixError> {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let stem = format!("{file_name}.{}", report_timestamp());

    let backup_failed = |backup: &Path, e: io::Error| FixError::BackupFailed {
        file: file.display().to_string(),
        backup: backup.display().to_string(),
        message: e.to_string(),
    };
    let mut source = File::open(file)
        .map_err(|e| backup_failed(&backup_dir.join(format!("{stem}.backup")), e))?;
    let (backup_path, mut target) =
        create_unique(backup_dir, &stem, ".backup").map_err(|e| backup_failed(backup_dir, e))?;
    io::copy(&mut source, &mut target).map_err(|e| backup_failed(&backup_path, e))?;

    tracing::debug!(file = %file.display(), backup = %backup_path.display(), "backup created");
    Ok(backup_path)
}

/// Create a new file `<dir>/<stem><suffix>`, or `<stem>.<n><suffix>` for the
/// first free `n` when the name is taken.
pub(crate) fn create_unique(dir: &Path, stem: &str, suffix: &str) -> io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)?;
    for n in 0..u16::MAX {
        let name = if n == 0 {
            format!("{stem}{suffix}")
        } else {
            format!("{stem}.{n}{suffix}")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free name for {stem}{suffix}"),
    ))
}
