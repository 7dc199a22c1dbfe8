//! Vaultex - export the part of an Obsidian-style vault that carries a tag.
//!
//! # Overview
//!
//! Given a set of tags, vaultex selects:
//! - every note whose tags, or any ancestor of them, match an include entry
//!   (`#project` matches a note tagged `#project/alpha`)
//! - every file one of those notes links to or embeds, one hop deep
//!
//! and copies the selection into an export folder, preserving the vault
//! layout.
//!
//! Selection runs against any [`VaultSource`]: [`VaultIndex`] reads a vault
//! from disk, [`MemorySource`] is handy for tests.
//!
//! # Example
//!
//! ```no_run
//! use vaultex::export::{copy_documents, ExportPlan};
//! use vaultex::{select_all, Criteria, Vault, VaultIndex};
//!
//! let vault = Vault::new("/path/to/vault").unwrap();
//! let index = VaultIndex::build(vault).unwrap();
//!
//! let criteria = Criteria::new(["project"], Vec::<String>::new());
//! let selection = select_all(&index, &criteria);
//!
//! let plan = ExportPlan::from_selection(&selection, &index.vault().root, "/tmp/export");
//! let report = copy_documents(&plan);
//! println!("copied {} files", report.copied);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod index;
pub mod logging;
pub mod note;
pub mod parser;
pub mod select;
pub mod source;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{ExportError, Result};
pub use index::VaultIndex;
pub use note::Note;
pub use select::{decompose, select, select_all, Criteria, ExcludePolicy, QueryMode, Selection};
pub use source::{MemorySource, VaultSource};
pub use types::*;
pub use vault::Vault;
