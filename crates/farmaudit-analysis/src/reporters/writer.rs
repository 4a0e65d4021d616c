//! Timestamped JSON + Markdown report files.

use std::path::{Path, PathBuf};

use farmaudit_core::errors::ReportError;
use serde::{Deserialize, Serialize};

/// A document a stage writes at the end of its run.
pub trait Report: Serialize {
    /// File name prefix, e.g. `service-audit`.
    fn stem(&self) -> &'static str;
    /// Timestamp embedded in the file names.
    fn timestamp(&self) -> &str;
    fn to_markdown(&self) -> String;
}

/// Paths of a written report pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenReport {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// Writes reports into one directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `<stem>-<timestamp>.json` and `<stem>-<timestamp>.md`.
    pub fn write<R: Report>(&self, report: &R) -> Result<WrittenReport, ReportError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ReportError::Write {
            path: self.dir.display().to_string(),
            message: e.to_string(),
        })?;

        let base = format!("{}-{}", report.stem(), report.timestamp());
        let json_path = self.dir.join(format!("{base}.json"));
        let md_path = self.dir.join(format!("{base}.md"));

        let json = serde_json::to_string_pretty(report).map_err(|e| ReportError::Serialize {
            what: report.stem().to_string(),
            message: e.to_string(),
        })?;
        write_file(&json_path, &json)?;
        write_file(&md_path, &report.to_markdown())?;

        tracing::info!(
            report = report.stem(),
            json = %json_path.display(),
            markdown = %md_path.display(),
            "report written"
        );
        Ok(WrittenReport {
            json: json_path,
            markdown: md_path,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ReportError> {
    std::fs::write(path, content).map_err(|e| ReportError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Dummy {
        timestamp: String,
        value: u32,
    }

    impl Report for Dummy {
        fn stem(&self) -> &'static str {
            "dummy"
        }
        fn timestamp(&self) -> &str {
            &self.timestamp
        }
        fn to_markdown(&self) -> String {
            format!("# Dummy\n\nvalue: {}\n", self.value)
        }
    }

    #[test]
    fn test_writes_pair() {
        let dir = tempfile::TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));
        let written = writer
            .write(&Dummy {
                timestamp: "2026-01-02T03-04-05-006Z".into(),
                value: 7,
            })
            .unwrap();
        assert!(written.json.ends_with("dummy-2026-01-02T03-04-05-006Z.json"));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written.json).unwrap()).unwrap();
        assert_eq!(json["value"], 7);
        assert!(std::fs::read_to_string(&written.markdown)
            .unwrap()
            .contains("value: 7"));
    }
}
