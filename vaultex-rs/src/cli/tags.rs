//! `decompose` and `tags` commands.

use crate::cli::args::{DecomposeArgs, TagsArgs};
use crate::cli::output::Output;
use crate::error::{ExitCode, ExportError, Result};
use crate::index::VaultIndex;
use crate::select::{decompose, decompose_all};
use crate::source::VaultSource;
use crate::types::TagSource;
use crate::vault::Vault;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct DecomposeOutput {
    pub tag: String,
    pub chain: Vec<String>,
}

/// Tags of a single note.
#[derive(Debug, Serialize)]
pub struct NoteTagsOutput {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<NoteTagOutput>,
    /// Full tag set used for matching; only with `--decomposed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decomposed: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct NoteTagOutput {
    pub tag: String,
    pub line: usize,
    pub source: TagSource,
}

#[derive(Debug, Serialize)]
pub struct VaultTagsOutput {
    pub notes: usize,
    pub tags: Vec<VaultTagOutput>,
}

/// A tag and the number of notes it matches.
#[derive(Debug, Serialize)]
pub struct VaultTagOutput {
    pub tag: String,
    pub count: usize,
}

/// Print the chain a tag contributes to a note's tag set.
pub fn decompose_tag(args: &DecomposeArgs, output: &Output) -> Result<ExitCode> {
    let tag = args.tag.trim();
    let tag = tag.strip_prefix('#').unwrap_or(tag);
    output.print(&DecomposeOutput {
        tag: tag.to_string(),
        chain: decompose(tag),
    })?;
    Ok(ExitCode::Success)
}

pub fn tags(vault: Vault, args: &TagsArgs, output: &Output) -> Result<ExitCode> {
    let index = VaultIndex::build(vault)?;
    match &args.note {
        Some(query) => note_tags(&index, query, args.decomposed, output),
        None => vault_tags(&index, args.decomposed, output),
    }
}

fn note_tags(index: &VaultIndex, query: &str, decomposed: bool, output: &Output) -> Result<ExitCode> {
    let path = index
        .find_note(query)
        .ok_or_else(|| ExportError::NoteNotFound(query.to_string()))?;
    let note = index.vault().load_note(&path)?;
    let tags = note.tags();

    let decomposed = decomposed.then(|| {
        let mut set = decompose_all(tags.iter().map(|t| t.name.as_str()));
        set.sort();
        set.dedup();
        set
    });

    output.print(&NoteTagsOutput {
        path,
        tags: tags
            .into_iter()
            .map(|t| NoteTagOutput {
                tag: t.name,
                line: t.line,
                source: t.source,
            })
            .collect(),
        decomposed,
    })?;
    Ok(ExitCode::Success)
}

/// Count notes per tag. With `decomposed`, a note also counts towards every
/// ancestor of its tags, which is exactly how many notes `--include <tag>`
/// would match.
fn vault_tags(index: &VaultIndex, decomposed: bool, output: &Output) -> Result<ExitCode> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let documents = index.documents();

    for document in &documents {
        let Some(literal) = index.tags(document) else {
            continue;
        };
        let set: BTreeSet<String> = if decomposed {
            decompose_all(&literal).into_iter().collect()
        } else {
            literal.into_iter().collect()
        };
        for tag in set {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    output.print(&VaultTagsOutput {
        notes: documents.len(),
        tags: counts
            .into_iter()
            .map(|(tag, count)| VaultTagOutput { tag, count })
            .collect(),
    })?;
    Ok(ExitCode::Success)
}
