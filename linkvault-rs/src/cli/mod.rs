//! CLI command implementations.

pub mod args;
pub mod output;

pub mod headings;
pub mod info;
pub mod links;
pub mod list;
pub mod resolve;
pub mod search;
pub mod tags;
pub mod watch;

pub use args::{Cli, Commands};
pub use output::Output;

use crate::error::{Result, VaultError};
use crate::scanner::has_document_extension;
use crate::types::DocumentRecord;
use crate::vault::Vault;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A note as shown in command output.
#[derive(Debug, Clone, Serialize)]
pub struct NoteRef {
    pub name: String,
    pub path: PathBuf,
}

impl NoteRef {
    pub fn new(vault: &Vault, doc: &DocumentRecord) -> Self {
        Self {
            name: doc.display_name.clone(),
            path: relative_path(vault, &doc.location),
        }
    }
}

/// `path` relative to the vault root, or unchanged when outside it.
pub fn relative_path(vault: &Vault, path: &Path) -> PathBuf {
    vault
        .settings()
        .vault_root
        .and_then(|root| path.strip_prefix(&root).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Find a note by name, or by path relative to the vault when the argument
/// carries a document extension.
pub fn locate_note(vault: &Vault, note: &str) -> Result<Arc<DocumentRecord>> {
    let candidate = Path::new(note.trim());
    if has_document_extension(candidate) {
        if let Some(root) = vault.settings().vault_root {
            let location = if candidate.is_absolute() {
                candidate.to_path_buf()
            } else {
                root.join(candidate)
            };
            if let Some(doc) = vault.get_document_by_location(&location) {
                return Ok(doc);
            }
        }
    }

    vault
        .find_by_name(note)
        .ok_or_else(|| VaultError::NoteNotFound(note.to_string()))
}
