//! In-memory index of a vault on disk: literal tags and resolved links of
//! every note, built in one pass.

use crate::error::Result;
use crate::graph::{LinkIndex, Resolver};
use crate::source::VaultSource;
use crate::types::Document;
use crate::vault::Vault;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Tags and links of every note in a [`Vault`].
#[derive(Debug)]
pub struct VaultIndex {
    vault: Vault,
    notes: Vec<PathBuf>,
    resolver: Resolver,
    tags: HashMap<PathBuf, Vec<String>>,
    links: LinkIndex,
}

impl VaultIndex {
    /// Load and parse every note of the vault.
    ///
    /// A note that cannot be read is kept in the enumeration but has no
    /// metadata, so selection treats it as untagged.
    pub fn build(vault: Vault) -> Result<Self> {
        let files = vault.list_files()?;
        let notes: Vec<PathBuf> = files
            .iter()
            .filter(|path| Document::new(path.as_path()).is_note())
            .cloned()
            .collect();
        let resolver = Resolver::new(files.iter().cloned());

        let mut tags = HashMap::new();
        let mut links = LinkIndex::new();

        for path in &notes {
            let note = match vault.load_note(path) {
                Ok(note) => note,
                Err(e) => {
                    tracing::warn!(note = %path.display(), error = %e, "cannot read note; treating it as untagged");
                    continue;
                }
            };

            for link in note.links() {
                match resolver.resolve(&link.target, path) {
                    Some(target) => links.insert(path.clone(), target),
                    None => links.insert_unresolved(path.clone(), link.target),
                }
            }
            tags.insert(path.clone(), note.tag_names());
        }

        tracing::info!(
            notes = notes.len(),
            files = files.len(),
            links = links.edge_count(),
            "indexed vault"
        );

        Ok(Self {
            vault,
            notes,
            resolver,
            tags,
            links,
        })
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn links(&self) -> &LinkIndex {
        &self.links
    }

    /// Number of indexed notes.
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Resolve a user-supplied note name or path to a vault note.
    pub fn find_note(&self, query: &str) -> Option<PathBuf> {
        self.resolver
            .resolve(query, Path::new(""))
            .filter(|path| Document::new(path.as_path()).is_note())
    }
}

impl VaultSource for VaultIndex {
    fn documents(&self) -> Vec<Document> {
        self.notes.iter().map(|p| Document::new(p.as_path())).collect()
    }

    fn tags(&self, document: &Document) -> Option<Vec<String>> {
        self.tags.get(document.path()).cloned()
    }

    fn outbound_links(&self, path: &Path) -> Vec<PathBuf> {
        self.links.outbound(path)
    }

    fn resolve(&self, path: &Path) -> Option<Document> {
        // Files deleted since indexing no longer resolve.
        (self.resolver.contains(path) && self.vault.file_exists(path)).then(|| Document::new(path))
    }
}
