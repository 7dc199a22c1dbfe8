//! Note representation.

use crate::error::Result;
use crate::parser::{parse_note_links, parse_tags, unique_tag_names};
use crate::types::{Link, Tag};
use std::path::{Path, PathBuf};

/// A markdown note loaded from the vault.
#[derive(Debug, Clone)]
pub struct Note {
    /// Path relative to vault root (e.g., "proj/My Project.md").
    pub path: PathBuf,

    /// Raw content of the note.
    pub content: String,
}

impl Note {
    /// Create a note from path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Load a note from disk.
    pub fn load(vault_root: &Path, relative_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(vault_root.join(relative_path))?;
        Ok(Self::new(relative_path, content))
    }

    /// All tags in the note, frontmatter first.
    pub fn tags(&self) -> Vec<Tag> {
        parse_tags(&self.content)
    }

    /// The note's literal tag names (no `#`, no duplicates).
    pub fn tag_names(&self) -> Vec<String> {
        unique_tag_names(&self.tags())
    }

    /// All outbound links, frontmatter first.
    pub fn links(&self) -> Vec<Link> {
        parse_note_links(&self.content)
    }
}
