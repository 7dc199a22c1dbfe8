//! `export` and `select` commands.

use crate::cli::args::{ExportArgs, SelectArgs, SelectionArgs};
use crate::cli::output::Output;
use crate::config::ExportSettings;
use crate::error::{ExitCode, ExportError, Result};
use crate::export::{copy_documents, CopyReport, ExportPlan, PlannedCopy};
use crate::index::VaultIndex;
use crate::select::{select_all, Criteria, ExcludePolicy, QueryMode, Selection};
use crate::types::{Document, DocumentKind};
use crate::vault::{normalize_path, Vault};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub criteria: Criteria,
    pub files: Vec<SelectedFile>,
    pub matched: usize,
    pub linked: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<PathBuf>,
    /// Link texts in matched notes that name no vault file.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub broken_links: BTreeMap<PathBuf, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub kind: DocumentKind,
    /// Whether the file matched the tags itself (vs. pulled in by a link).
    pub matched: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse<'a> {
    pub destination: &'a PathBuf,
    pub dry_run: bool,
    pub files: &'a [PlannedCopy],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<&'a CopyReport>,
}

/// Build immutable criteria from the flags, falling back to config defaults.
pub fn criteria_from(args: &SelectionArgs, settings: &ExportSettings) -> Criteria {
    let mode = if args.split {
        QueryMode::Split
    } else {
        settings.query_mode()
    };
    let policy = if args.apply_exclude {
        ExcludePolicy::Subtract
    } else {
        settings.exclude_policy()
    };
    Criteria::parse(&args.include, &args.exclude, mode).with_exclude_policy(policy)
}

/// Print what an export would contain. Exits with `NothingSelected` when
/// the selection is empty, like `grep` without a match.
pub fn select(
    vault: Vault,
    args: &SelectArgs,
    settings: &ExportSettings,
    output: &Output,
) -> Result<ExitCode> {
    let criteria = criteria_from(&args.selection, settings);
    let index = VaultIndex::build(vault)?;
    let selection = select_all(&index, &criteria);

    output.print(&select_response(criteria, &selection, &index))?;
    if selection.is_empty() {
        Ok(ExitCode::NothingSelected)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Select, plan and copy.
pub fn export(
    vault: Vault,
    args: &ExportArgs,
    settings: &ExportSettings,
    output: &Output,
) -> Result<ExitCode> {
    let criteria = criteria_from(&args.selection, settings);

    let destination = normalize_path(&match &args.dest {
        Some(dest) if dest.is_absolute() => dest.clone(),
        Some(dest) => vault.root.join(dest),
        None => settings.destination(&vault.root),
    });
    if vault.is_root(&destination) {
        return Err(ExportError::DestinationIsVault(destination));
    }
    let source_root = vault.root.clone();

    // Earlier exports inside the vault must not feed back into the selection.
    let index = VaultIndex::build(vault.exclude(&destination))?;
    let selection = select_all(&index, &criteria);

    if selection.is_empty() {
        if args.fail_empty {
            return Err(ExportError::NothingSelected(criteria.include().to_vec()));
        }
        output.info("Nothing to export: no note matched the given tags");
        output.print(&ExportResponse {
            destination: &destination,
            dry_run: args.dry_run,
            files: &[],
            report: None,
        })?;
        return Ok(ExitCode::Success);
    }

    let plan = ExportPlan::from_selection(&selection, source_root, &destination);

    if args.dry_run {
        output.print(&ExportResponse {
            destination: &destination,
            dry_run: true,
            files: &plan.entries,
            report: None,
        })?;
        return Ok(ExitCode::Success);
    }

    let report = copy_documents(&plan);
    output.info(&format!(
        "Exported {} files ({} bytes) to {}",
        report.copied,
        report.bytes,
        destination.display()
    ));
    output.print(&ExportResponse {
        destination: &destination,
        dry_run: false,
        files: &plan.entries,
        report: Some(&report),
    })?;

    report.ensure_success()?;
    Ok(ExitCode::Success)
}

fn select_response(criteria: Criteria, selection: &Selection, index: &VaultIndex) -> SelectResponse {
    let file = |doc: &Document, matched: bool| SelectedFile {
        path: doc.path.clone(),
        kind: doc.kind(),
        matched,
    };
    SelectResponse {
        files: selection
            .matched()
            .iter()
            .map(|d| file(d, true))
            .chain(selection.linked().iter().map(|d| file(d, false)))
            .collect(),
        matched: selection.matched,
        linked: selection.linked().len(),
        unresolved: selection.unresolved.clone(),
        broken_links: selection
            .matched()
            .iter()
            .map(|doc| (doc.path.clone(), index.links().unresolved(&doc.path)))
            .filter(|(_, texts)| !texts.is_empty())
            .collect(),
        criteria,
    }
}
