//! End-to-end tests of the library API: index a vault on disk, select, copy.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vaultex::export::{copy_documents, ExportPlan};
use vaultex::{select_all, Criteria, Document, ExcludePolicy, Vault, VaultIndex};

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

fn research_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "Papers/Attention.md",
        "---\ntags:\n  - research/ml\n  - reading\n---\nSummary in [notes](../Notes/Summary%20Notes.md).\n![](figures/heads.png)\n",
    );
    write(root, "Papers/figures/heads.png", "PNG");
    write(root, "Notes/Summary Notes.md", "Mentions [[Attention]].\n");
    write(
        root,
        "Journal/2024-01-01.md",
        "Worked on #research today.\n```\n#research/not-a-tag\n[[Secret]]\n```\n",
    );
    write(root, "Secret.md", "#private\n");
    write(root, ".obsidian/workspace.json", "{}");
    dir
}

fn paths(documents: &[Document]) -> Vec<PathBuf> {
    documents.iter().map(|d| d.path.clone()).collect()
}

#[test]
fn index_select_and_copy() {
    let vault_dir = research_vault();
    let index = VaultIndex::build(Vault::new(vault_dir.path()).unwrap()).unwrap();

    let criteria = Criteria::new(["research"], Vec::<String>::new());
    let selection = select_all(&index, &criteria);

    assert_eq!(selection.matched, 2);
    assert_eq!(
        paths(&selection.documents),
        vec![
            PathBuf::from("Journal/2024-01-01.md"),
            PathBuf::from("Papers/Attention.md"),
            PathBuf::from("Notes/Summary Notes.md"),
            PathBuf::from("Papers/figures/heads.png"),
        ]
    );

    let out = TempDir::new().unwrap();
    let plan = ExportPlan::from_selection(&selection, vault_dir.path(), out.path());
    let report = copy_documents(&plan);
    assert!(report.is_success());
    assert_eq!(report.copied, 4);
    assert!(out.path().join("Notes/Summary Notes.md").is_file());
    assert!(out.path().join("Papers/figures/heads.png").is_file());
    assert!(!out.path().join("Secret.md").exists());
}

#[test]
fn links_in_code_blocks_are_ignored() {
    let vault_dir = research_vault();
    let index = VaultIndex::build(Vault::new(vault_dir.path()).unwrap()).unwrap();

    let selection = select_all(&index, &Criteria::new(["research/not-a-tag"], Vec::<String>::new()));
    assert!(selection.is_empty());

    let journal = select_all(&index, &Criteria::new(["research"], Vec::<String>::new()));
    assert!(!paths(&journal.documents).contains(&PathBuf::from("Secret.md")));
}

#[test]
fn subtract_policy_only_drops_matched_notes() {
    let vault_dir = research_vault();
    write(vault_dir.path(), "Notes/Summary Notes.md", "#reading\nMentions [[Attention]].\n");
    let index = VaultIndex::build(Vault::new(vault_dir.path()).unwrap()).unwrap();

    let criteria = Criteria::new(["research"], ["reading"]).with_exclude_policy(ExcludePolicy::Subtract);
    let selection = select_all(&index, &criteria);

    // Attention is dropped for carrying #reading; the journal still matches.
    assert_eq!(paths(selection.matched()), vec![PathBuf::from("Journal/2024-01-01.md")]);
    assert!(selection.linked().is_empty());
}

#[test]
fn deleted_attachment_is_reported_unresolved() {
    let vault_dir = research_vault();
    let index = VaultIndex::build(Vault::new(vault_dir.path()).unwrap()).unwrap();
    fs::remove_file(vault_dir.path().join("Papers/figures/heads.png")).unwrap();

    let selection = select_all(&index, &Criteria::new(["research/ml"], Vec::<String>::new()));
    assert_eq!(
        paths(&selection.documents),
        vec![
            PathBuf::from("Papers/Attention.md"),
            PathBuf::from("Notes/Summary Notes.md"),
        ]
    );
    assert_eq!(selection.unresolved, vec![PathBuf::from("Papers/figures/heads.png")]);
}
