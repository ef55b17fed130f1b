//! Configuration file loading and engine settings.

use crate::error::{Result, VaultError};
use crate::normalize::{NormalizationPolicy, SpaceReplacement};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings the index is built against.
///
/// Changing the root or either normalization flag triggers a full rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Vault root. `None` means no vault is open and the index stays empty.
    pub vault_root: Option<PathBuf>,
    pub case_sensitive: bool,
    pub space_replacement: SpaceReplacement,
}

impl Settings {
    pub fn new(vault_root: Option<PathBuf>, policy: NormalizationPolicy) -> Self {
        Self {
            vault_root,
            case_sensitive: policy.case_sensitive,
            space_replacement: policy.space_replacement,
        }
    }

    pub fn policy(&self) -> NormalizationPolicy {
        NormalizationPolicy::new(self.case_sensitive, self.space_replacement)
    }

    /// Same settings with the root made absolute and symlink-free, when it exists.
    pub fn canonicalized(mut self) -> Self {
        if let Some(root) = self.vault_root.take() {
            self.vault_root = Some(root.canonicalize().unwrap_or(root));
        }
        self
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vault: VaultConfig,

    /// Link and tag name normalization.
    #[serde(default)]
    pub links: NormalizationPolicy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Default vault root, used when `--vault` is not given.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for stderr output (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional log file.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Level for the log file; defaults to `level`.
    #[serde(default)]
    pub file_level: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            file_level: None,
        }
    }
}

impl Config {
    /// Default config file location: `<config dir>/linkvault/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("linkvault").join("config.toml"))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VaultError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Engine settings, preferring `override_root` over the configured root.
    pub fn settings(&self, override_root: Option<&Path>) -> Settings {
        let root = override_root
            .map(Path::to_path_buf)
            .or_else(|| self.vault.root.as_ref().map(|r| expand_home(r)));
        Settings::new(root, self.links).canonicalized()
    }
}

// `~/notes` in a config file means the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
