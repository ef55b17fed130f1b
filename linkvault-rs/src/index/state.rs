//! The in-memory index: document records, name lookup and tag aggregates.

use crate::index::tags::TagTable;
use crate::normalize::NormalizationPolicy;
use crate::scanner::ScanIssue;
use crate::types::DocumentRecord;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A complete snapshot of the index.
///
/// `by_name` and `name_by_location` are kept exact inverses of each other,
/// and `tags` always equals the union of the records' tag sets.
///
/// Documents that lost a canonical name collision are kept aside in
/// `shadowed`, invisible to queries, until the name frees up again.
#[derive(Debug, Clone, Default)]
pub struct IndexState {
    root: Option<PathBuf>,
    policy: NormalizationPolicy,
    by_name: HashMap<String, Arc<DocumentRecord>>,
    name_by_location: HashMap<PathBuf, String>,
    tags: TagTable,
    shadowed: BTreeMap<PathBuf, Arc<DocumentRecord>>,
    last_rebuild: Option<DateTime<Utc>>,
    scan_issues: Vec<ScanIssue>,
}

impl IndexState {
    /// An empty index for the given root and policy.
    pub fn new(root: Option<PathBuf>, policy: NormalizationPolicy) -> Self {
        Self {
            root,
            policy,
            ..Self::default()
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn policy(&self) -> NormalizationPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn get_by_location(&self, location: &Path) -> Option<&Arc<DocumentRecord>> {
        let name = self.name_by_location.get(location)?;
        self.by_name.get(name)
    }

    /// Look up by an already-normalized name.
    pub fn get_by_name(&self, canonical: &str) -> Option<&Arc<DocumentRecord>> {
        self.by_name.get(canonical)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Arc<DocumentRecord>> {
        self.by_name.values()
    }

    /// Every record, sorted by location.
    pub fn sorted_documents(&self) -> Vec<Arc<DocumentRecord>> {
        let mut docs: Vec<_> = self.by_name.values().cloned().collect();
        docs.sort_by(|a, b| a.location.cmp(&b.location));
        docs
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn last_rebuild(&self) -> Option<DateTime<Utc>> {
        self.last_rebuild
    }

    pub fn scan_issues(&self) -> &[ScanIssue] {
        &self.scan_issues
    }

    pub(crate) fn mark_rebuilt(&mut self, at: DateTime<Utc>, issues: Vec<ScanIssue>) {
        self.last_rebuild = Some(at);
        self.scan_issues = issues;
    }

    /// Insert or replace the record for `record.location`.
    ///
    /// Another document already holding the same canonical name is shadowed:
    /// dropped from every query until the name is free again. Returns false
    /// when an identical record was already present.
    pub fn insert(&mut self, record: DocumentRecord) -> bool {
        let unchanged = self
            .get_by_location(&record.location)
            .or_else(|| self.shadowed.get(&record.location))
            .is_some_and(|existing| **existing == record);
        if unchanged {
            return false;
        }

        self.shadowed.remove(&record.location);
        let replaced = self.detach(&record.location);

        if let Some(previous) = self.by_name.get(&record.name).cloned() {
            debug!(
                name = %record.name,
                kept = %record.location.display(),
                shadowed = %previous.location.display(),
                "canonical name collision"
            );
            self.detach(&previous.location);
            self.shadowed.insert(previous.location.clone(), previous);
        }

        let name = record.name.clone();
        self.attach(Arc::new(record));

        if let Some(old) = replaced {
            if old.name != name {
                self.promote(&old.name);
            }
        }
        true
    }

    /// Remove the record at `location`. Returns whether any query-visible
    /// state changed.
    ///
    /// A removed name holder hands its name to a shadowed document, if any.
    pub fn remove(&mut self, location: &Path) -> bool {
        if self.shadowed.remove(location).is_some() {
            return false;
        }
        let Some(record) = self.detach(location) else {
            return false;
        };
        self.promote(&record.name);
        true
    }

    /// Remove every record at or beneath `prefix`. Returns whether any was removed.
    pub fn remove_under(&mut self, prefix: &Path) -> bool {
        self.shadowed.retain(|location, _| !location.starts_with(prefix));

        let doomed: Vec<PathBuf> = self
            .name_by_location
            .keys()
            .filter(|location| location.starts_with(prefix))
            .cloned()
            .collect();

        let mut removed = false;
        for location in doomed {
            removed |= self.remove(&location);
        }
        removed
    }

    fn attach(&mut self, record: Arc<DocumentRecord>) {
        self.tags.add(&record.location, &record.tags);
        self.name_by_location
            .insert(record.location.clone(), record.name.clone());
        self.by_name.insert(record.name.clone(), record);
    }

    fn detach(&mut self, location: &Path) -> Option<Arc<DocumentRecord>> {
        let name = self.name_by_location.remove(location)?;
        let record = self.by_name.remove(&name)?;
        self.tags.remove(location, &record.tags);
        Some(record)
    }

    // The greatest shadowed location takes a freed name, the same document
    // a rebuild in sorted order ends up keeping.
    fn promote(&mut self, name: &str) {
        let Some(location) = self
            .shadowed
            .iter()
            .rev()
            .find(|(_, record)| record.name == name)
            .map(|(location, _)| location.clone())
        else {
            return;
        };
        if let Some(record) = self.shadowed.remove(&location) {
            debug!(name, location = %location.display(), "shadowed document takes over name");
            self.attach(record);
        }
    }

    /// Whether the name map and location map are exact inverses and the tag
    /// table matches the records.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        if self.by_name.len() != self.name_by_location.len() {
            return false;
        }
        let maps_inverse = self.by_name.iter().all(|(name, record)| {
            record.name == *name && self.name_by_location.get(&record.location) == Some(name)
        });

        let mut expected = TagTable::default();
        for record in self.by_name.values() {
            expected.add(&record.location, &record.tags);
        }

        let shadows_held = self.shadowed.iter().all(|(location, record)| {
            !self.name_by_location.contains_key(location) && self.by_name.contains_key(&record.name)
        });

        maps_inverse && shadows_held && expected == self.tags
    }
}
