//! Recursive discovery of documents beneath the vault root.

use crate::fs::{EntryKind, VaultFs};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// File extensions recognized as documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A directory that could not be read during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub message: String,
}

/// Result of scanning a vault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Eligible document locations, sorted.
    pub documents: Vec<PathBuf>,
    /// Directories skipped because they could not be read.
    pub issues: Vec<ScanIssue>,
}

/// Whether a file name has a document extension.
pub fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOCUMENT_EXTENSIONS.contains(&e))
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Whether `path` is a document the scanner would report for `root`:
/// beneath the root, no hidden segment, document extension.
pub fn is_eligible(root: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };

    let mut segments = 0;
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                if is_hidden(&name.to_string_lossy()) {
                    return false;
                }
                segments += 1;
            }
            _ => return false,
        }
    }

    segments > 0 && has_document_extension(path)
}

/// Walk `root` and collect every eligible document.
///
/// Hidden entries are skipped along with everything beneath them. A
/// directory that cannot be read is recorded as a [`ScanIssue`] and the walk
/// continues with its siblings.
pub fn scan(fs: &dyn VaultFs, root: &Path) -> ScanReport {
    let mut report = ScanReport::default();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs.read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                report.issues.push(ScanIssue {
                    path: dir,
                    message: e.to_string(),
                });
                continue;
            }
        };

        for entry in entries {
            if is_hidden(&entry.name) {
                continue;
            }
            match entry.kind {
                EntryKind::Directory => pending.push(entry.path),
                EntryKind::File if has_document_extension(&entry.path) => {
                    report.documents.push(entry.path)
                }
                EntryKind::File => {}
            }
        }
    }

    report.documents.sort();
    report.issues.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        root = %root.display(),
        documents = report.documents.len(),
        issues = report.issues.len(),
        "scan finished"
    );
    report
}
