//! Tag-based note selection with one-hop link closure.
//!
//! Selection runs in two passes over the candidate notes:
//!
//! 1. **Matching**: a note's literal tags are decomposed into their ancestor
//!    chains; the note matches when any include entry is in that set.
//! 2. **Closure**: every outbound link target of a matched note is resolved
//!    and appended, whether or not it matches itself. Links of the appended
//!    targets are not followed.
//!
//! The result keeps duplicates: a resource linked from two matched notes
//! appears twice.

mod criteria;
mod decompose;

pub use criteria::{Criteria, ExcludePolicy, QueryMode};
pub use decompose::{decompose, decompose_all};

use crate::source::VaultSource;
use crate::types::Document;
use serde::Serialize;
use std::path::PathBuf;

/// Result of a selection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Matched notes followed by their linked resources, in order.
    pub documents: Vec<Document>,

    /// How many leading entries of `documents` are tag matches.
    pub matched: usize,

    /// Outbound targets the source listed but can no longer resolve, such as
    /// files deleted after indexing. Link texts that never named a vault
    /// file are not listed here; see
    /// [`LinkIndex::unresolved`](crate::graph::LinkIndex::unresolved).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<PathBuf>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// The tag-matched notes.
    pub fn matched(&self) -> &[Document] {
        &self.documents[..self.matched]
    }

    /// The resources added by link closure.
    pub fn linked(&self) -> &[Document] {
        &self.documents[self.matched..]
    }
}

/// Select the documents to export from `documents`.
///
/// Never fails: untagged notes, notes without metadata and blank criteria
/// all degrade to "no match", and unresolvable link targets are dropped.
pub fn select<S: VaultSource + ?Sized>(
    source: &S,
    documents: &[Document],
    criteria: &Criteria,
) -> Selection {
    let mut selection = Selection::default();

    for document in documents {
        let Some(tags) = source.tags(document).filter(|tags| !tags.is_empty()) else {
            tracing::trace!(document = %document.path.display(), "no tags");
            continue;
        };

        let tag_set = decompose_all(&tags);
        if !criteria.includes(&tag_set) {
            continue;
        }
        if criteria.excludes(&tag_set) {
            tracing::debug!(document = %document.path.display(), "matched but excluded");
            continue;
        }

        tracing::debug!(document = %document.path.display(), "matched");
        selection.documents.push(document.clone());
    }
    selection.matched = selection.documents.len();

    for i in 0..selection.matched {
        let source_path = selection.documents[i].path.clone();
        for target in source.outbound_links(&source_path) {
            match source.resolve(&target) {
                Some(linked) => {
                    tracing::debug!(
                        from = %source_path.display(),
                        to = %linked.path.display(),
                        "linked"
                    );
                    selection.documents.push(linked);
                }
                None => {
                    tracing::debug!(
                        from = %source_path.display(),
                        to = %target.display(),
                        "link target not found; skipping"
                    );
                    selection.unresolved.push(target);
                }
            }
        }
    }

    tracing::info!(
        matched = selection.matched,
        linked = selection.len() - selection.matched,
        unresolved = selection.unresolved.len(),
        "selection complete"
    );

    selection
}

/// Select from every document the source enumerates.
pub fn select_all<S: VaultSource + ?Sized>(source: &S, criteria: &Criteria) -> Selection {
    select(source, &source.documents(), criteria)
}
