//! Error types and exit codes for vaultex.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const VAULT_NOT_FOUND: i32 = 2;
    pub const NOTHING_SELECTED: i32 = 3;
    pub const EXPORT_FAILED: i32 = 4;
}

/// Main error type for vaultex operations.
///
/// Selection itself never fails; these cover the host side (locating the
/// vault, reading config, copying files).
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("No vault given (use --vault or set `vault` in {0})")]
    NoVaultConfigured(PathBuf),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Nothing to export: no note matched {0:?}")]
    NothingSelected(Vec<String>),

    #[error("Export failed: {failed} of {total} files could not be copied")]
    ExportFailed { failed: usize, total: usize },

    #[error("Export folder {0} is the vault root; choose a folder inside or outside the vault")]
    DestinationIsVault(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl ExportError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::VaultNotFound(_) | ExportError::NoVaultConfigured(_) => {
                exit_code::VAULT_NOT_FOUND
            }
            ExportError::NothingSelected(_) => exit_code::NOTHING_SELECTED,
            ExportError::ExportFailed { .. } | ExportError::DestinationIsVault(_) => {
                exit_code::EXPORT_FAILED
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for vaultex operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Exit status of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    NothingSelected,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::NothingSelected => exit_code::NOTHING_SELECTED,
        }
    }
}
