//! Tag aggregates maintained alongside the document records.

use crate::types::TagInfo;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Canonical tag name to the set of documents carrying it.
///
/// An entry exists only while its member set is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable {
    members: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl TagTable {
    pub fn add<'a>(&mut self, location: &Path, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            self.members
                .entry(tag.clone())
                .or_default()
                .insert(location.to_path_buf());
        }
    }

    pub fn remove<'a>(&mut self, location: &Path, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            if let Some(set) = self.members.get_mut(tag) {
                set.remove(location);
                if set.is_empty() {
                    self.members.remove(tag);
                }
            }
        }
    }

    /// Every tag, sorted by name.
    pub fn all(&self) -> Vec<TagInfo> {
        self.members
            .iter()
            .map(|(name, notes)| TagInfo {
                name: name.clone(),
                count: notes.len(),
                notes: notes.iter().cloned().collect(),
            })
            .collect()
    }

    /// Sorted members of a canonical tag, or empty.
    pub fn documents(&self, tag: &str) -> Vec<PathBuf> {
        self.members
            .get(tag)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
