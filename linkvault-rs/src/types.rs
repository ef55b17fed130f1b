//! Shared types for linkvault.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A wikilink or embed found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The raw target note name, trimmed. Normalized lazily at query time.
    pub target: String,

    /// Optional heading reference (the part after #).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    /// Optional display alias (the part after |).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Whether this is an embed (![[...]]) rather than a link.
    pub embed: bool,

    /// Line number where this link appears (1-indexed).
    pub line: usize,
}

/// A heading found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// The heading text (without the # prefix), case preserved.
    pub text: String,

    /// The heading level (1-6).
    pub level: u8,

    /// Line number where this heading appears (1-indexed).
    pub line: usize,

    /// The slug for linking (lowercase, hyphens for spaces).
    pub slug: String,
}

/// Everything the parser extracts from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub links: Vec<Link>,
    pub headings: Vec<Heading>,
    /// Canonical tags from inline `#tags` and front matter combined.
    pub tags: BTreeSet<String>,
}

/// The indexed form of a single document.
///
/// Records are replaced wholesale on re-parse; they are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Absolute location of the document.
    pub location: PathBuf,

    /// Canonical (normalized) name used as the index key.
    pub name: String,

    /// File name without extension, as shown to users.
    pub display_name: String,

    /// Links in document order.
    pub links: Vec<Link>,

    /// Headings in document order.
    pub headings: Vec<Heading>,

    /// Canonical tags.
    pub tags: BTreeSet<String>,
}

/// A tag together with the documents that carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    /// Canonical tag name, without `#`.
    pub name: String,

    /// Number of distinct documents carrying the tag.
    pub count: usize,

    /// Locations of those documents, sorted.
    pub notes: Vec<PathBuf>,
}

/// Kind of a file-system change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
}

/// A file-system change event delivered to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path of the changed file or directory.
    pub path: PathBuf,
    /// Kind of change.
    pub kind: ChangeKind,
}

impl FileChange {
    pub fn added(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Added,
        }
    }

    pub fn updated(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Updated,
        }
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ChangeKind::Deleted,
        }
    }
}
