//! The document index and the operations that mutate it.
//!
//! All file reads and parsing happen before the write lock is taken, so
//! readers only ever wait for the final swap or record replacement.

mod state;
mod tags;

pub use state::IndexState;
pub use tags::TagTable;

use crate::fs::VaultFs;
use crate::normalize::NormalizationPolicy;
use crate::parser::parse_document;
use crate::scanner::{has_document_extension, is_eligible, scan};
use crate::types::{ChangeKind, DocumentRecord, FileChange};
use chrono::Utc;
use parking_lot::{RwLock, RwLockReadGuard};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Read and parse one document into its record.
pub fn build_record(
    fs: &dyn VaultFs,
    location: &Path,
    policy: &NormalizationPolicy,
) -> io::Result<DocumentRecord> {
    let content = fs.read_to_string(location)?;
    let parsed = parse_document(&content, location, policy);
    let display_name = display_name(location);

    Ok(DocumentRecord {
        location: location.to_path_buf(),
        name: policy.normalize_name(&display_name),
        display_name,
        links: parsed.links,
        headings: parsed.headings,
        tags: parsed.tags,
    })
}

/// File name without its extension.
pub fn display_name(location: &Path) -> String {
    location
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Build a complete index for `root` without touching any live state.
///
/// An absent root yields an empty index; an unreadable one yields an empty
/// index with a scan issue.
pub fn build_state(fs: &dyn VaultFs, root: Option<&Path>, policy: NormalizationPolicy) -> IndexState {
    let mut state = IndexState::new(root.map(Path::to_path_buf), policy);

    let Some(root) = root else {
        state.mark_rebuilt(Utc::now(), Vec::new());
        return state;
    };

    let report = scan(fs, root);
    for location in &report.documents {
        match build_record(fs, location, &policy) {
            Ok(record) => {
                state.insert(record);
            }
            Err(e) => warn!(path = %location.display(), error = %e, "skipping unreadable document"),
        }
    }

    state.mark_rebuilt(Utc::now(), report.issues);
    state
}

/// Shared, lock-protected index.
#[derive(Debug, Default)]
pub struct IndexStore {
    state: RwLock<IndexState>,
}

impl IndexStore {
    pub fn new(state: IndexState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Shared access for queries. Keep the guard short-lived.
    pub fn read(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read()
    }

    /// Rebuild from scratch and swap the result in.
    pub fn rebuild(&self, fs: &dyn VaultFs, root: Option<&Path>, policy: NormalizationPolicy) {
        let fresh = build_state(fs, root, policy);
        info!(
            root = %root.map(|r| r.display().to_string()).unwrap_or_default(),
            documents = fresh.len(),
            tags = fresh.tags().len(),
            issues = fresh.scan_issues().len(),
            "index rebuilt"
        );
        *self.state.write() = fresh;
    }

    /// Apply one file-system change. Returns whether observable state changed.
    pub fn apply(&self, fs: &dyn VaultFs, change: &FileChange) -> bool {
        match change.kind {
            ChangeKind::Deleted => self.remove(&change.path),
            ChangeKind::Added | ChangeKind::Updated => {
                if has_document_extension(&change.path) {
                    self.upsert(fs, &change.path)
                } else {
                    self.upsert_tree(fs, &change.path)
                }
            }
        }
    }

    /// Re-read one document and replace its record.
    ///
    /// A document that no longer exists is removed. Other read failures keep
    /// the existing record.
    pub fn upsert(&self, fs: &dyn VaultFs, location: &Path) -> bool {
        let (root, policy) = self.settings();
        let Some(root) = root else { return false };
        if !is_eligible(&root, location) {
            debug!(path = %location.display(), "ignoring ineligible path");
            return false;
        }

        match build_record(fs, location, &policy) {
            Ok(record) => {
                let changed = self.state.write().insert(record);
                debug!(path = %location.display(), changed, "document upserted");
                changed
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.remove(location),
            Err(e) => {
                warn!(path = %location.display(), error = %e, "keeping previous record after read failure");
                false
            }
        }
    }

    /// Remove a document, or every document beneath a removed directory.
    pub fn remove(&self, location: &Path) -> bool {
        let mut state = self.state.write();
        if state.remove(location) {
            debug!(path = %location.display(), "document removed");
            return true;
        }
        state.remove_under(location)
    }

    // A directory appearing inside the vault (created or moved in) brings
    // its documents along without individual events.
    fn upsert_tree(&self, fs: &dyn VaultFs, dir: &Path) -> bool {
        let (Some(root), _) = self.settings() else {
            return false;
        };
        if !is_eligible_dir(&root, dir) {
            return false;
        }
        if fs.read_dir(dir).is_err() {
            return false;
        }

        let mut changed = false;
        for location in scan(fs, dir).documents {
            changed |= self.upsert(fs, &location);
        }
        changed
    }

    fn settings(&self) -> (Option<PathBuf>, NormalizationPolicy) {
        let state = self.state.read();
        (state.root().map(Path::to_path_buf), state.policy())
    }
}

fn is_eligible_dir(root: &Path, dir: &Path) -> bool {
    dir.strip_prefix(root).is_ok_and(|relative| {
        relative.components().all(|c| match c {
            std::path::Component::Normal(name) => !name.to_string_lossy().starts_with('.'),
            _ => false,
        })
    })
}
