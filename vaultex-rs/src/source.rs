//! The lookups selection needs from whatever holds the vault.

use crate::graph::LinkIndex;
use crate::types::Document;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Capability interface over a document collection.
///
/// Implemented by [`VaultIndex`](crate::index::VaultIndex) for vaults on
/// disk and by [`MemorySource`] for collections built in memory.
pub trait VaultSource {
    /// Markdown notes eligible for selection, in a stable order.
    fn documents(&self) -> Vec<Document>;

    /// Literal tags of a document (no `#`), or `None` when the metadata is
    /// unavailable.
    fn tags(&self, document: &Document) -> Option<Vec<String>>;

    /// Distinct link targets of the document at `path`, in a stable order.
    fn outbound_links(&self, path: &Path) -> Vec<PathBuf>;

    /// The document at `path`, if the collection knows it.
    fn resolve(&self, path: &Path) -> Option<Document>;
}

/// A collection held entirely in memory.
///
/// Link targets do not have to be known documents; such links simply fail to
/// resolve.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: BTreeMap<PathBuf, Option<Vec<String>>>,
    links: LinkIndex,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note with the given literal tags.
    pub fn with_note<I, S>(mut self, path: impl Into<PathBuf>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files
            .insert(path.into(), Some(tags.into_iter().map(Into::into).collect()));
        self
    }

    /// Add a note whose metadata cannot be retrieved.
    pub fn with_unreadable_note(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), None);
        self
    }

    /// Add a non-note file (attachment).
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), Some(Vec::new()));
        self
    }

    /// Add a link from `source` to `target`.
    pub fn with_link(mut self, source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.links.insert(source, target);
        self
    }
}

impl VaultSource for MemorySource {
    fn documents(&self) -> Vec<Document> {
        self.files
            .keys()
            .map(|path| Document::new(path.as_path()))
            .filter(Document::is_note)
            .collect()
    }

    fn tags(&self, document: &Document) -> Option<Vec<String>> {
        self.files.get(document.path()).cloned().flatten()
    }

    fn outbound_links(&self, path: &Path) -> Vec<PathBuf> {
        self.links.outbound(path)
    }

    fn resolve(&self, path: &Path) -> Option<Document> {
        self.files
            .contains_key(path)
            .then(|| Document::new(path))
    }
}
