//! User configuration (`~/.config/vaultex/config.toml`).

use crate::error::{ExportError, Result};
use crate::select::{ExcludePolicy, QueryMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "VAULTEX_CONFIG";

/// Default export folder, relative to the vault root.
pub const DEFAULT_EXPORT_FOLDER: &str = "./export/";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault used when `--vault` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    pub export: ExportSettings,
}

/// Defaults for the export command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Destination folder; relative paths are taken from the vault root.
    pub folder: PathBuf,

    /// Split include/exclude fields on commas and whitespace.
    pub split_queries: bool,

    /// Drop matched notes that carry an excluded tag.
    pub apply_exclude: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            folder: PathBuf::from(DEFAULT_EXPORT_FOLDER),
            split_queries: false,
            apply_exclude: false,
        }
    }
}

impl ExportSettings {
    pub fn query_mode(&self) -> QueryMode {
        if self.split_queries {
            QueryMode::Split
        } else {
            QueryMode::Single
        }
    }

    pub fn exclude_policy(&self) -> ExcludePolicy {
        if self.apply_exclude {
            ExcludePolicy::Subtract
        } else {
            ExcludePolicy::Ignore
        }
    }

    /// Absolute destination for a vault rooted at `vault_root`.
    pub fn destination(&self, vault_root: &Path) -> PathBuf {
        if self.folder.is_absolute() {
            self.folder.clone()
        } else {
            vault_root.join(&self.folder)
        }
    }
}

impl Config {
    /// Location of the config file: `$VAULTEX_CONFIG`, else the platform
    /// config directory.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or_else(|| {
            ExportError::ConfigError("could not determine config directory".to_string())
        })?;
        Ok(dir.join("vaultex").join("config.toml"))
    }

    /// Load the config; a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = toml::from_str(&contents)?;
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Pick the vault: explicit argument first, then the configured one.
    pub fn resolve_vault_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit.or(self.vault.as_deref()) {
            Some(path) => Ok(path.to_path_buf()),
            None => Err(ExportError::NoVaultConfigured(Self::path()?)),
        }
    }
}
