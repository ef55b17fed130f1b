//! File-system capability consumed by the index.

use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// An immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    /// File name of the entry.
    pub name: String,
    /// Full location of the entry.
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Read access to the vault.
///
/// Implementations must be shareable across threads; the index calls them
/// from whichever thread submits a change or runs a query.
pub trait VaultFs: Send + Sync {
    /// Immediate children of `dir`. Order does not matter.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>>;

    /// Full text of a document. A missing file is `ErrorKind::NotFound`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`VaultFs`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl VaultFs for LocalFs {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;

            let path = entry.path();

            // Linked notes count; linked folders are not followed.
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_symlink() && path.is_dir() {
                continue;
            } else {
                EntryKind::File
            };

            entries.push(FsEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }

        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
