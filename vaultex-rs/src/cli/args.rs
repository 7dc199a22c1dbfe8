//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultex")]
#[command(author, version, about = "Export tag-selected notes and everything they link to", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy matching notes and their linked files to an export folder
    Export(ExportArgs),

    /// Show which files an export would include, without copying
    Select(SelectArgs),

    /// Expand a tag into itself and its ancestors
    Decompose(DecomposeArgs),

    /// Show the tags of a note, or tag counts across the vault
    Tags(TagsArgs),
}

/// Tag selection flags shared by `export` and `select`.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Tag to include (can be repeated); ancestors match descendants
    #[arg(short, long = "include", value_name = "TAG", required = true)]
    pub include: Vec<String>,

    /// Tag to exclude (can be repeated); ignored unless --apply-exclude
    #[arg(short, long = "exclude", value_name = "TAG")]
    pub exclude: Vec<String>,

    /// Split each tag argument on commas and whitespace
    #[arg(long)]
    pub split: bool,

    /// Drop matched notes that carry an excluded tag
    #[arg(long)]
    pub apply_exclude: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Destination folder (relative paths are taken from the vault root)
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Print the copy plan instead of copying
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error when nothing matches
    #[arg(long)]
    pub fail_empty: bool,
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args, Debug)]
pub struct DecomposeArgs {
    /// Tag to decompose (a leading # is ignored)
    pub tag: String,
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Note name or path; omit for vault-wide counts
    pub note: Option<String>,

    /// Show every ancestor a tag contributes
    #[arg(long)]
    pub decomposed: bool,
}
