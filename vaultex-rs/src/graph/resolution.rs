//! Link target resolution logic.
//!
//! A link text resolves to a vault file in this order:
//! 1. Exact path from the vault root
//! 2. Path relative to the linking note's folder
//! 3. Case-insensitive path from the vault root
//! 4. File name (or trailing path) match anywhere in the vault; the
//!    shortest path wins, ties broken lexically
//!
//! Targets without an extension are looked up as `.md` notes.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Lookup tables over every file in a vault.
#[derive(Debug, Default, Clone)]
pub struct Resolver {
    paths: HashSet<PathBuf>,
    by_lower_path: HashMap<String, PathBuf>,
    by_name: HashMap<String, Vec<PathBuf>>,
}

impl Resolver {
    /// Build lookup tables from vault-relative file paths.
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut resolver = Resolver::default();
        for path in files {
            let path: PathBuf = path.into();
            resolver
                .by_lower_path
                .entry(match_key(&slash_path(&path)))
                .or_insert_with(|| path.clone());
            if let Some(name) = path.file_name() {
                resolver
                    .by_name
                    .entry(match_key(&name.to_string_lossy()))
                    .or_default()
                    .push(path.clone());
            }
            resolver.paths.insert(path);
        }
        for candidates in resolver.by_name.values_mut() {
            candidates.sort_by(|a, b| {
                a.components()
                    .count()
                    .cmp(&b.components().count())
                    .then_with(|| a.cmp(b))
            });
        }
        resolver
    }

    /// Whether a vault-relative path is a known file.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Resolve a link target written in the note at `from`.
    ///
    /// Returns `None` for broken links.
    pub fn resolve(&self, target: &str, from: &Path) -> Option<PathBuf> {
        let target = target.split('#').next().unwrap_or(target).trim();
        let target = target.trim_start_matches('/');
        if target.is_empty() {
            return None;
        }

        for candidate in candidates(target) {
            if let Some(path) = self.resolve_candidate(&candidate, from) {
                return Some(path);
            }
        }
        None
    }

    fn resolve_candidate(&self, candidate: &str, from: &Path) -> Option<PathBuf> {
        if let Some(path) = normalize(Path::new(candidate)) {
            if self.paths.contains(&path) {
                return Some(path);
            }
        }

        let folder = from.parent().unwrap_or(Path::new(""));
        if let Some(path) = normalize(&folder.join(candidate)) {
            if self.paths.contains(&path) {
                return Some(path);
            }
        }

        let key = match_key(candidate);
        if let Some(path) = self.by_lower_path.get(&key) {
            return Some(path.clone());
        }

        let name = key.rsplit('/').next().unwrap_or(&key);
        let suffix = format!("/{}", key);
        self.by_name.get(name).and_then(|paths| {
            paths
                .iter()
                .find(|path| {
                    let path_key = match_key(&slash_path(path));
                    path_key == key || path_key.ends_with(&suffix)
                })
                .cloned()
        })
    }
}

/// Candidate file paths for a link target: extensionless targets are notes;
/// anything else is tried verbatim first, then as a note (`Note v1.2`).
fn candidates(target: &str) -> Vec<String> {
    let has_md = target.to_lowercase().ends_with(".md");
    if has_md {
        vec![target.to_string()]
    } else if Path::new(target).extension().is_some() {
        vec![target.to_string(), format!("{}.md", target)]
    } else {
        vec![format!("{}.md", target)]
    }
}

/// Collapse `.` and `..` components; `None` if the path escapes the vault.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Case- and normalization-insensitive comparison key.
fn match_key(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> Resolver {
        Resolver::new([
            "Home.md",
            "notes/Project.md",
            "notes/deep/Project.md",
            "archive/Old Note.md",
            "assets/img.png",
            "other/img.png",
            "Version 1.2.md",
            "Caf\u{0065}\u{0301}.md",
        ])
    }

    #[test]
    fn test_exact_path() {
        let r = resolver();
        assert_eq!(
            r.resolve("notes/deep/Project", Path::new("Home.md")),
            Some(PathBuf::from("notes/deep/Project.md"))
        );
        assert_eq!(
            r.resolve("assets/img.png", Path::new("Home.md")),
            Some(PathBuf::from("assets/img.png"))
        );
    }

    #[test]
    fn test_relative_to_linking_note() {
        let r = resolver();
        assert_eq!(
            r.resolve("../other/img.png", Path::new("notes/Project.md")),
            Some(PathBuf::from("other/img.png"))
        );
        assert_eq!(
            r.resolve("./deep/Project.md", Path::new("notes/Project.md")),
            Some(PathBuf::from("notes/deep/Project.md"))
        );
    }

    #[test]
    fn test_name_match_prefers_shortest_path() {
        let r = resolver();
        assert_eq!(
            r.resolve("project", Path::new("Home.md")),
            Some(PathBuf::from("notes/Project.md"))
        );
        assert_eq!(
            r.resolve("img.png", Path::new("Home.md")),
            Some(PathBuf::from("assets/img.png"))
        );
    }

    #[test]
    fn test_trailing_path_match() {
        let r = resolver();
        assert_eq!(
            r.resolve("deep/Project", Path::new("Home.md")),
            Some(PathBuf::from("notes/deep/Project.md"))
        );
    }

    #[test]
    fn test_subpath_and_case() {
        let r = resolver();
        assert_eq!(
            r.resolve("old note#Heading", Path::new("Home.md")),
            Some(PathBuf::from("archive/Old Note.md"))
        );
    }

    #[test]
    fn test_dotted_note_name() {
        let r = resolver();
        assert_eq!(
            r.resolve("Version 1.2", Path::new("Home.md")),
            Some(PathBuf::from("Version 1.2.md"))
        );
    }

    #[test]
    fn test_unicode_normalization() {
        let r = resolver();
        assert_eq!(
            r.resolve("Caf\u{00e9}", Path::new("Home.md")),
            Some(PathBuf::from("Caf\u{0065}\u{0301}.md"))
        );
    }

    #[test]
    fn test_broken_links() {
        let r = resolver();
        assert_eq!(r.resolve("Missing", Path::new("Home.md")), None);
        assert_eq!(r.resolve("../../escape.png", Path::new("notes/Project.md")), None);
        assert_eq!(r.resolve("  ", Path::new("Home.md")), None);
    }
}
