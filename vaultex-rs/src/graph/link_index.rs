//! Resolved outbound-link index.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Per-note map of outbound link targets.
///
/// Resolved targets map vault paths to the number of links pointing there;
/// unresolved targets keep the raw link text. Targets of one note iterate in
/// path order.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LinkIndex {
    resolved: HashMap<PathBuf, BTreeMap<PathBuf, usize>>,
    unresolved: HashMap<PathBuf, BTreeMap<String, usize>>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one link from `source` to the resolved path `target`.
    pub fn insert(&mut self, source: impl Into<PathBuf>, target: impl Into<PathBuf>) {
        *self
            .resolved
            .entry(source.into())
            .or_default()
            .entry(target.into())
            .or_insert(0) += 1;
    }

    /// Record one link from `source` that did not resolve to a vault file.
    pub fn insert_unresolved(&mut self, source: impl Into<PathBuf>, target: impl Into<String>) {
        *self
            .unresolved
            .entry(source.into())
            .or_default()
            .entry(target.into())
            .or_insert(0) += 1;
    }

    /// Distinct resolved targets of a note, in path order.
    pub fn outbound(&self, source: &Path) -> Vec<PathBuf> {
        self.resolved
            .get(source)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Distinct unresolved link texts of a note, in lexical order.
    pub fn unresolved(&self, source: &Path) -> Vec<String> {
        self.unresolved
            .get(source)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Total number of distinct resolved edges.
    pub fn edge_count(&self) -> usize {
        self.resolved.values().map(BTreeMap::len).sum()
    }
}
