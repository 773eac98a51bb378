//! Writes one report file per university.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::observability::metrics;
use crate::report::format::sanitize_filename;
use crate::resilience::Subject;

/// Error type for report writing.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no permission to write {}: {source}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error saving {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a report landed and whether it replaced an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub replaced: bool,
}

/// Report sink rooted at an output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create the writer, creating `output_dir` (and parents) if needed.
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self, ReportError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| ReportError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `{output_dir}/{sanitized name}.txt`, falling back to the domain when the
    /// name sanitizes to nothing.
    pub fn path_for(&self, subject: &Subject) -> PathBuf {
        let mut stem = sanitize_filename(&subject.name);
        if stem.is_empty() {
            stem = sanitize_filename(&subject.domain);
        }
        self.output_dir.join(format!("{}.txt", stem))
    }

    /// Write `contents` for `subject`, overwriting any existing report.
    pub fn write(&self, subject: &Subject, contents: &str) -> Result<WrittenReport, ReportError> {
        let path = self.path_for(subject);
        let replaced = path.exists();
        if replaced {
            tracing::warn!(name = %subject.name, path = %path.display(), "Report already exists, overwriting");
        }

        fs::write(&path, contents).map_err(|source| match source.kind() {
            io::ErrorKind::PermissionDenied => ReportError::PermissionDenied {
                path: path.clone(),
                source,
            },
            _ => ReportError::Write {
                path: path.clone(),
                source,
            },
        })?;

        metrics::record_report_written(replaced);
        Ok(WrittenReport { path, replaced })
    }
}
