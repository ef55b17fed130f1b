//! Error types and exit codes for linkvault.
//!
//! The indexing engine itself never fails: every degraded path is logged and
//! skipped. These errors belong to the outer surfaces (configuration, the
//! watcher, and the CLI).

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const VAULT_NOT_CONFIGURED: i32 = 3;
    pub const BROKEN_LINKS_FOUND: i32 = 10;
}

/// Main error type for linkvault operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("No vault configured (pass --vault or set vault.root in the config file)")]
    VaultNotConfigured,

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Watcher error: {0}")]
    Watcher(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl VaultError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::NoteNotFound(_) => exit_code::NOTE_NOT_FOUND,
            VaultError::VaultNotConfigured | VaultError::VaultNotFound(_) => {
                exit_code::VAULT_NOT_CONFIGURED
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for linkvault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Exit code for CLI operations that completed.
///
/// Failures carry their code on [`VaultError::exit_code`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    BrokenLinksFound,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::BrokenLinksFound => exit_code::BROKEN_LINKS_FOUND,
        }
    }
}
