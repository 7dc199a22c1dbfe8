//! Mapping selected documents to destination paths.

use crate::select::Selection;
use crate::types::{Document, DocumentKind};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// One file to copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCopy {
    /// Vault-relative path.
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Where every selected document goes.
///
/// Each path appears once, at its first position in the selection, so no two
/// entries write the same destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPlan {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub entries: Vec<PlannedCopy>,
}

impl ExportPlan {
    pub fn new(
        documents: &[Document],
        source_root: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
    ) -> Self {
        let source_root = source_root.into();
        let destination_root = destination_root.into();
        let mut seen = HashSet::new();

        let entries = documents
            .iter()
            .filter(|doc| seen.insert(doc.path.clone()))
            .map(|doc| PlannedCopy {
                path: doc.path.clone(),
                kind: doc.kind(),
                from: source_root.join(&doc.path),
                to: destination_root.join(&doc.path),
            })
            .collect();

        Self {
            source_root,
            destination_root,
            entries,
        }
    }

    pub fn from_selection(
        selection: &Selection,
        source_root: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
    ) -> Self {
        Self::new(&selection.documents, source_root, destination_root)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
