//! Copying a planned export to disk.

use super::plan::{ExportPlan, PlannedCopy};
use crate::error::{ExportError, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

/// A file that could not be copied.
#[derive(Debug, Clone, Serialize)]
pub struct CopyFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of [`copy_documents`].
#[derive(Debug, Default, Serialize)]
pub struct CopyReport {
    pub copied: usize,
    pub bytes: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<CopyFailure>,
}

impl CopyReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Turn a partial failure into an error.
    pub fn ensure_success(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ExportError::ExportFailed {
                failed: self.failed.len(),
                total: self.copied + self.failed.len(),
            })
        }
    }
}

/// Copy every planned file, creating parent directories and overwriting
/// existing files.
///
/// Entries are copied in parallel. A failing entry does not stop the others;
/// failures are listed in the report in plan order.
pub fn copy_documents(plan: &ExportPlan) -> CopyReport {
    let results: Vec<(usize, io::Result<u64>)> = plan
        .entries
        .par_iter()
        .enumerate()
        .map(|(i, entry)| (i, copy_one(entry)))
        .collect();

    let mut report = CopyReport::default();
    for (i, result) in results {
        let entry = &plan.entries[i];
        match result {
            Ok(bytes) => {
                tracing::debug!(from = %entry.from.display(), to = %entry.to.display(), bytes, "copied");
                report.copied += 1;
                report.bytes += bytes;
            }
            Err(e) => {
                tracing::warn!(path = %entry.path.display(), error = %e, "copy failed");
                report.failed.push(CopyFailure {
                    path: entry.path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        copied = report.copied,
        failed = report.failed.len(),
        bytes = report.bytes,
        destination = %plan.destination_root.display(),
        "export finished"
    );
    report
}

fn copy_one(entry: &PlannedCopy) -> io::Result<u64> {
    // Copying a file onto itself truncates it.
    if is_same_file(entry)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} would be copied onto itself", entry.from.display()),
        ));
    }
    if let Some(parent) = entry.to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&entry.from, &entry.to)
}

fn is_same_file(entry: &PlannedCopy) -> io::Result<bool> {
    if entry.from == entry.to {
        return Ok(true);
    }
    if !entry.to.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(&entry.from)? == fs::canonicalize(&entry.to)?)
}
