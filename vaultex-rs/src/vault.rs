//! Vault representation and file enumeration.

use crate::error::{ExportError, Result};
use crate::note::Note;
use crate::types::Document;
use glob::{Pattern, glob};
use std::path::{Component, Path, PathBuf};

/// Represents an Obsidian vault on disk.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,

    /// Vault-relative prefixes that are never enumerated (e.g. an export
    /// folder living inside the vault).
    excluded: Vec<PathBuf>,
}

impl Vault {
    /// Open a vault rooted at an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(ExportError::VaultNotFound(root));
        }

        Ok(Self {
            root,
            excluded: Vec::new(),
        })
    }

    /// Skip everything under `prefix` when listing files.
    ///
    /// `prefix` may be under the vault root or relative to it. Absolute paths
    /// outside the vault are ignored since they can never be listed anyway.
    pub fn exclude(mut self, prefix: impl AsRef<Path>) -> Self {
        let prefix = prefix.as_ref();
        let relative: PathBuf = match prefix
            .strip_prefix(&self.root)
            .or_else(|_| prefix.strip_prefix(normalize_path(&self.root)))
        {
            Ok(rel) => rel.to_path_buf(),
            Err(_) if prefix.is_absolute() => return self,
            Err(_) => prefix.to_path_buf(),
        };
        let relative: PathBuf = relative
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if !relative.as_os_str().is_empty() {
            self.excluded.push(relative);
        }
        self
    }

    /// Whether `path` names the vault root itself.
    ///
    /// Existing paths are compared after resolving symlinks, others
    /// lexically.
    pub fn is_root(&self, path: &Path) -> bool {
        match (self.root.canonicalize(), path.canonicalize()) {
            (Ok(root), Ok(path)) => root == path,
            _ => normalize_path(&self.root) == normalize_path(path),
        }
    }

    /// Get the full path to a vault file.
    pub fn full_path(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Check if a file exists in the vault.
    pub fn file_exists(&self, relative_path: &Path) -> bool {
        self.full_path(relative_path).is_file()
    }

    /// Load a note from the vault.
    pub fn load_note(&self, relative_path: &Path) -> Result<Note> {
        Note::load(&self.root, relative_path)
    }

    /// List every visible file in the vault, sorted by path.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        self.list_matching("**/*")
    }

    /// List all markdown notes in the vault, sorted by path.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .list_files()?
            .into_iter()
            .filter(|path| Document::new(path.as_path()).is_note())
            .collect())
    }

    /// List visible files matching a glob pattern relative to the root.
    pub fn list_matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let root = Pattern::escape(&self.root.to_string_lossy());
        let full_pattern = format!("{}/{}", root.trim_end_matches('/'), pattern);

        let mut files = Vec::new();

        for entry in glob(&full_pattern)? {
            match entry {
                Ok(path) => {
                    if !path.is_file() {
                        continue;
                    }
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        if self.is_visible(relative) {
                            files.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable vault entry");
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_visible(&self, relative: &Path) -> bool {
        let hidden = relative
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'));
        !hidden && !self.excluded.iter().any(|prefix| relative.starts_with(prefix))
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// A `..` that cannot be collapsed is kept on relative paths and dropped at
/// the root of absolute ones.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
