//! Integration tests for the vaultex CLI against throwaway vaults.

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

/// A small vault: two notes under `#project`, one reference note they both
/// link to, a note only reachable in two hops, and an attachment.
fn project_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "Projects/Alpha.md",
        "---\ntags: [project/alpha]\n---\n# Alpha\nSee [[Ref]], ![[diagram.png]] and [[Missing]].\n",
    );
    write(root, "Draft.md", "#project/beta #draft\nBuilds on [[Ref|the reference]].\n");
    write(root, "Notes/Ref.md", "Reference material, see [[Deep]].\n");
    write(root, "Notes/Deep.md", "Two hops away.\n");
    write(root, "Other.md", "#personal\n");
    write(root, "assets/diagram.png", "PNG");
    dir
}

/// Run the CLI and return stdout, stderr and the exit code. The user config
/// is pointed at a file that does not exist so local settings never leak in.
fn run_vaultex(vault: Option<&Path>, args: &[&str]) -> (String, String, i32) {
    let config_dir = TempDir::new().unwrap();
    let binary = env!("CARGO_BIN_EXE_vaultex");

    let mut command = Command::new(binary);
    command
        .env("VAULTEX_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    if let Some(vault) = vault {
        command.arg("--vault").arg(vault);
    }
    let output = command.args(args).output().expect("Failed to execute vaultex");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn json(stdout: &str) -> Value {
    serde_json::from_str(stdout).expect("stdout is JSON")
}

fn paths(files: &Value) -> Vec<String> {
    files
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap().to_string())
        .collect()
}

mod select_command {
    use super::*;

    #[test]
    fn select_matches_ancestor_and_links_one_hop() {
        let vault = project_vault();
        let (stdout, _, code) = run_vaultex(Some(vault.path()), &["select", "-i", "project"]);
        assert_eq!(code, 0);

        let response = json(&stdout);
        assert_eq!(response["matched"], 2);
        assert_eq!(response["linked"], 3);
        assert_eq!(
            paths(&response["files"]),
            vec![
                "Draft.md",
                "Projects/Alpha.md",
                "Notes/Ref.md",
                "Notes/Ref.md",
                "assets/diagram.png",
            ]
        );
        assert_eq!(response["files"][0]["matched"], true);
        assert_eq!(response["files"][2]["matched"], false);
        assert_eq!(
            response["broken_links"],
            serde_json::json!({ "Projects/Alpha.md": ["Missing"] })
        );
    }

    #[test]
    fn select_specific_tag() {
        let vault = project_vault();
        let (stdout, _, code) =
            run_vaultex(Some(vault.path()), &["select", "-i", "project/alpha"]);
        assert_eq!(code, 0);
        assert_eq!(
            paths(&json(&stdout)["files"]),
            vec!["Projects/Alpha.md", "Notes/Ref.md", "assets/diagram.png"]
        );
    }

    #[test]
    fn select_nothing_exits_3() {
        let vault = project_vault();
        let (stdout, _, code) = run_vaultex(Some(vault.path()), &["select", "-i", "nope"]);
        assert_eq!(code, 3);
        assert_eq!(json(&stdout)["matched"], 0);
    }

    #[test]
    fn exclude_ignored_unless_applied() {
        let vault = project_vault();
        let args = ["select", "-i", "project", "-e", "draft"];
        let (stdout, _, _) = run_vaultex(Some(vault.path()), &args);
        assert_eq!(json(&stdout)["matched"], 2);

        let mut applied = args.to_vec();
        applied.push("--apply-exclude");
        let (stdout, _, _) = run_vaultex(Some(vault.path()), &applied);
        let response = json(&stdout);
        assert_eq!(response["matched"], 1);
        assert!(!paths(&response["files"]).contains(&"Draft.md".to_string()));
    }

    #[test]
    fn split_mode() {
        let vault = project_vault();
        let (stdout, _, _) = run_vaultex(
            Some(vault.path()),
            &["select", "-i", "project/alpha, personal", "--split"],
        );
        assert_eq!(json(&stdout)["matched"], 2);

        // Without --split the field is a single tag that matches nothing.
        let (_, _, code) =
            run_vaultex(Some(vault.path()), &["select", "-i", "project/alpha, personal"]);
        assert_eq!(code, 3);
    }
}

mod export_command {
    use super::*;

    #[test]
    fn export_copies_selection() {
        let vault = project_vault();
        let (stdout, _, code) = run_vaultex(
            Some(vault.path()),
            &["export", "-i", "project", "--dest", "out"],
        );
        assert_eq!(code, 0);

        let out = vault.path().join("out");
        assert!(out.join("Draft.md").is_file());
        assert!(out.join("Projects/Alpha.md").is_file());
        assert!(out.join("Notes/Ref.md").is_file());
        assert_eq!(fs::read_to_string(out.join("assets/diagram.png")).unwrap(), "PNG");
        assert!(!out.join("Notes/Deep.md").exists());
        assert!(!out.join("Other.md").exists());

        let response = json(&stdout);
        assert_eq!(response["files"].as_array().unwrap().len(), 4);
        assert_eq!(response["report"]["copied"], 4);
    }

    #[test]
    fn export_folder_is_not_reselected() {
        let vault = project_vault();
        let args = ["export", "-i", "project", "--dest", "out"];
        assert_eq!(run_vaultex(Some(vault.path()), &args).2, 0);

        let (stdout, _, code) = run_vaultex(Some(vault.path()), &args);
        assert_eq!(code, 0);
        let files = paths(&json(&stdout)["files"]);
        assert_eq!(files.len(), 4);
        assert!(!files.iter().any(|f| f.starts_with("out")));
    }

    #[test]
    fn export_default_folder() {
        let vault = project_vault();
        let (_, _, code) = run_vaultex(Some(vault.path()), &["export", "-i", "personal"]);
        assert_eq!(code, 0);
        assert!(vault.path().join("export/Other.md").is_file());
    }

    #[test]
    fn dry_run_copies_nothing() {
        let vault = project_vault();
        let (stdout, _, code) = run_vaultex(
            Some(vault.path()),
            &["export", "-i", "project", "--dest", "out", "--dry-run"],
        );
        assert_eq!(code, 0);
        let response = json(&stdout);
        assert_eq!(response["dry_run"], true);
        assert_eq!(response["files"].as_array().unwrap().len(), 4);
        assert!(!vault.path().join("out").exists());
    }

    #[test]
    fn empty_export() {
        let vault = project_vault();
        let (_, _, code) = run_vaultex(Some(vault.path()), &["export", "-i", "nope"]);
        assert_eq!(code, 0);

        let (_, stderr, code) =
            run_vaultex(Some(vault.path()), &["export", "-i", "nope", "--fail-empty"]);
        assert_eq!(code, 3);
        assert!(stderr.contains("Nothing to export"));
    }

    #[test]
    fn missing_vault_exits_2() {
        let (_, stderr, code) =
            run_vaultex(Some(Path::new("/definitely/not/a/vault")), &["export", "-i", "a"]);
        assert_eq!(code, 2);
        assert!(stderr.contains("Vault not found"));
    }

    #[test]
    fn no_vault_configured_exits_2() {
        let (_, stderr, code) = run_vaultex(None, &["select", "-i", "a"]);
        assert_eq!(code, 2);
        assert!(stderr.contains("No vault given"));
        assert!(stderr.contains("config.toml"));
    }

    /// Vault with one tagged note embedding one image, for the
    /// destination checks below.
    fn small_vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "#t\n![[img.png]]\nimportant content");
        write(dir.path(), "img.png", "PNGDATA");
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        dir
    }

    fn assert_sources_intact(vault: &Path) {
        assert_eq!(
            fs::read_to_string(vault.join("a.md")).unwrap(),
            "#t\n![[img.png]]\nimportant content"
        );
        assert_eq!(fs::read_to_string(vault.join("img.png")).unwrap(), "PNGDATA");
    }

    #[test]
    fn export_into_vault_root_is_refused() {
        let vault = small_vault();
        let absolute = vault.path().to_string_lossy().to_string();

        for dest in [".", "sub/..", absolute.as_str()] {
            let (_, stderr, code) =
                run_vaultex(Some(vault.path()), &["export", "-i", "t", "--dest", dest]);
            assert_eq!(code, 4, "--dest {:?}", dest);
            assert!(stderr.contains("is the vault root"), "--dest {:?}", dest);
            assert_sources_intact(vault.path());
        }
    }

    #[test]
    fn configured_folder_at_vault_root_is_refused() {
        let vault = small_vault();
        let config_dir = TempDir::new().unwrap();
        let config = config_dir.path().join("config.toml");
        fs::write(&config, "[export]\nfolder = \".\"\n").unwrap();

        let output = Command::new(env!("CARGO_BIN_EXE_vaultex"))
            .env("VAULTEX_CONFIG", &config)
            .arg("--vault")
            .arg(vault.path())
            .args(["export", "-i", "t"])
            .output()
            .expect("Failed to execute vaultex");
        assert_eq!(output.status.code(), Some(4));
        assert_sources_intact(vault.path());
    }
}

mod tag_commands {
    use super::*;

    #[test]
    fn decompose_needs_no_vault() {
        let (stdout, _, code) = run_vaultex(None, &["decompose", "#hello/i/am"]);
        assert_eq!(code, 0);
        let response = json(&stdout);
        assert_eq!(response["tag"], "hello/i/am");
        assert_eq!(
            response["chain"],
            serde_json::json!(["hello/i/am", "hello/i", "hello"])
        );
    }

    #[test]
    fn vault_tag_counts() {
        let vault = project_vault();
        let (stdout, _, code) = run_vaultex(Some(vault.path()), &["tags"]);
        assert_eq!(code, 0);
        let response = json(&stdout);
        assert_eq!(response["notes"], 5);
        let tags: Vec<&str> = response["tags"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["tag"].as_str().unwrap())
            .collect();
        assert_eq!(tags, vec!["draft", "personal", "project/alpha", "project/beta"]);
    }

    #[test]
    fn decomposed_counts_include_ancestors() {
        let vault = project_vault();
        let (stdout, _, _) = run_vaultex(Some(vault.path()), &["tags", "--decomposed"]);
        let response = json(&stdout);
        let project = response["tags"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["tag"] == "project")
            .unwrap();
        assert_eq!(project["count"], 2);
    }

    #[test]
    fn note_tags() {
        let vault = project_vault();
        let (stdout, _, code) =
            run_vaultex(Some(vault.path()), &["tags", "alpha", "--decomposed"]);
        assert_eq!(code, 0);
        let response = json(&stdout);
        assert_eq!(response["path"], "Projects/Alpha.md");
        assert_eq!(response["tags"][0]["tag"], "project/alpha");
        assert_eq!(response["tags"][0]["source"], "frontmatter");
        assert_eq!(
            response["decomposed"],
            serde_json::json!(["project", "project/alpha"])
        );
    }

    #[test]
    fn unknown_note_is_error() {
        let vault = project_vault();
        let (_, stderr, code) = run_vaultex(Some(vault.path()), &["tags", "Nowhere"]);
        assert_eq!(code, 1);
        assert!(stderr.contains("Note not found"));
    }
}
