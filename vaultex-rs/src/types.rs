//! Shared types for vaultex.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file in the vault, identified by its path relative to the vault root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this document is a markdown note (as opposed to an attachment).
    pub fn is_note(&self) -> bool {
        self.path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("md"))
            .unwrap_or(false)
    }

    pub fn kind(&self) -> DocumentKind {
        if self.is_note() {
            DocumentKind::Note
        } else {
            DocumentKind::Attachment
        }
    }
}

/// Whether a document is a note or some other vault file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Note,
    Attachment,
}

/// Syntax a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkSyntax {
    /// `[[target]]` or `![[target]]`.
    Wiki,
    /// `[text](target)` or `![alt](target)`.
    Markdown,
}

/// A link or embed found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The link target as written, without heading, block reference or alias.
    pub target: String,

    /// Optional heading or block reference (the part after #).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,

    /// Whether this is an embed (`![[...]]` / `![...](...)`).
    pub embed: bool,

    pub syntax: LinkSyntax,

    /// Line number where this link appears (1-indexed, 0 for frontmatter).
    pub line: usize,
}

/// Where a tag was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagSource {
    Body,
    Frontmatter,
}

/// A tag found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag without the leading # (e.g., "rust" or "tray/autonomy").
    pub name: String,

    pub source: TagSource,

    /// Line number where this tag appears (1-indexed, 0 for frontmatter).
    pub line: usize,
}
