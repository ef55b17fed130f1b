//! The `Vault` handle: an index over one vault root and every query on it.

use crate::config::Settings;
use crate::coordinator::{ChangeCoordinator, Mutation};
use crate::events::{IndexChanged, Notifier};
use crate::fs::{LocalFs, VaultFs};
use crate::graph::{self, BrokenLink, LinkGraph, ResolvedLink, sort_by_display_name};
use crate::index::{IndexState, IndexStore};
use crate::parser::split_target;
use crate::scanner::ScanIssue;
use crate::search::{self, CancellationToken, SearchResult};
use crate::types::{DocumentRecord, FileChange, Heading, TagInfo};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// Summary numbers for an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub root: Option<PathBuf>,
    pub documents: usize,
    pub tags: usize,
    pub links: usize,
    pub last_rebuild: Option<DateTime<Utc>>,
    pub scan_issues: Vec<ScanIssue>,
}

struct VaultInner {
    fs: Arc<dyn VaultFs>,
    store: IndexStore,
    coordinator: ChangeCoordinator,
    notifier: Notifier,
    settings: Mutex<Settings>,
}

/// A live index over a vault.
///
/// Cloning is cheap and every clone shares the same index. Queries may run
/// from any thread, concurrently with a mutation in progress.
#[derive(Clone)]
pub struct Vault {
    inner: Arc<VaultInner>,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("settings", &*self.inner.settings.lock())
            .field("documents", &self.inner.store.read().len())
            .finish()
    }
}

impl Vault {
    /// Build the index for `settings` using `fs` for all reads.
    pub fn new(fs: Arc<dyn VaultFs>, settings: Settings) -> Self {
        let vault = Self {
            inner: Arc::new(VaultInner {
                fs,
                store: IndexStore::new(IndexState::new(None, settings.policy())),
                coordinator: ChangeCoordinator::new(),
                notifier: Notifier::new(),
                settings: Mutex::new(settings),
            }),
        };
        vault.submit([Mutation::Rebuild]);
        vault
    }

    /// Build the index over the local disk.
    pub fn open(settings: Settings) -> Self {
        Self::new(Arc::new(LocalFs), settings.canonicalized())
    }

    pub fn settings(&self) -> Settings {
        self.inner.settings.lock().clone()
    }

    /// Swap in new settings. A changed root or policy rebuilds the index.
    pub fn apply_settings(&self, settings: Settings) {
        let settings = settings.canonicalized();
        {
            let mut current = self.inner.settings.lock();
            if *current == settings {
                return;
            }
            info!(
                root = ?settings.vault_root,
                case_sensitive = settings.case_sensitive,
                space_replacement = ?settings.space_replacement,
                "settings changed, rebuilding"
            );
            *current = settings;
        }
        self.submit([Mutation::Rebuild]);
    }

    /// Rebuild from scratch with the current settings.
    pub fn rebuild(&self) {
        self.submit([Mutation::Rebuild]);
    }

    pub fn handle_change(&self, change: FileChange) {
        self.handle_changes([change]);
    }

    /// Feed file-system change events into the index.
    pub fn handle_changes(&self, changes: impl IntoIterator<Item = FileChange>) {
        self.submit(changes.into_iter().map(Mutation::Apply));
    }

    fn submit(&self, mutations: impl IntoIterator<Item = Mutation>) {
        let inner = &self.inner;
        inner.coordinator.submit(mutations, |batch| {
            let mut changed = false;
            for mutation in batch {
                match mutation {
                    Mutation::Rebuild => {
                        let settings = inner.settings.lock().clone();
                        inner.store.rebuild(
                            inner.fs.as_ref(),
                            settings.vault_root.as_deref(),
                            settings.policy(),
                        );
                        changed = true;
                    }
                    Mutation::Apply(change) => {
                        changed |= inner.store.apply(inner.fs.as_ref(), &change);
                    }
                }
            }
            if changed {
                inner.notifier.notify();
            }
        });
    }

    /// Subscribe to change notifications.
    pub fn on_index_changed(&self) -> broadcast::Receiver<IndexChanged> {
        self.inner.notifier.subscribe()
    }

    /// How many change notifications have fired.
    pub fn generation(&self) -> u64 {
        self.inner.notifier.generation()
    }

    /// Every indexed document, sorted by location.
    pub fn get_all_documents(&self) -> Vec<Arc<DocumentRecord>> {
        self.inner.store.read().sorted_documents()
    }

    pub fn get_document_by_location(&self, location: &Path) -> Option<Arc<DocumentRecord>> {
        self.inner.store.read().get_by_location(location).cloned()
    }

    /// Resolve a link target to a document location.
    ///
    /// `source` is accepted for API symmetry; resolution is by name only.
    pub fn resolve_link(&self, _source: &Path, target: &str) -> Option<PathBuf> {
        let state = self.inner.store.read();
        graph::resolve(&state, target).map(|doc| doc.location.clone())
    }

    /// Look up a document by (unnormalized) name.
    pub fn find_by_name(&self, target: &str) -> Option<Arc<DocumentRecord>> {
        let state = self.inner.store.read();
        graph::resolve(&state, target).cloned()
    }

    /// Resolve `Name#Header` down to the heading when it exists.
    pub fn resolve_link_target(&self, _source: &Path, target: &str) -> Option<ResolvedLink> {
        graph::resolve_with_heading(&self.inner.store.read(), target)
    }

    /// Documents linking to `location`, excluding itself.
    pub fn get_backlinks(&self, location: &Path) -> Vec<Arc<DocumentRecord>> {
        graph::backlinks(&self.inner.store.read(), location)
    }

    pub fn get_all_tags(&self) -> Vec<TagInfo> {
        self.inner.store.read().tags().all()
    }

    /// Documents carrying `name`, which may include `#` and any casing.
    pub fn get_documents_for_tag(&self, name: &str) -> Vec<PathBuf> {
        let state = self.inner.store.read();
        match state.policy().normalize_tag(name) {
            Some(tag) => state.tags().documents(&tag),
            None => Vec::new(),
        }
    }

    pub fn search(&self, query: &str, token: &CancellationToken) -> Vec<SearchResult> {
        search::search(self.inner.fs.as_ref(), &self.inner.store, query, token)
    }

    /// Documents whose display name contains `partial`, ignoring case.
    pub fn suggest_notes(&self, partial: &str) -> Vec<Arc<DocumentRecord>> {
        let needle = partial.trim().to_lowercase();
        let mut matches: Vec<_> = self
            .inner
            .store
            .read()
            .documents()
            .filter(|doc| doc.display_name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        sort_by_display_name(&mut matches);
        matches
    }

    /// Headings of the note `target` names, in document order.
    ///
    /// Any `#Header` suffix on `target` is ignored.
    pub fn headers_for(&self, target: &str) -> Vec<Heading> {
        let (name, _) = split_target(target);
        self.find_by_name(name)
            .map(|doc| doc.headings.clone())
            .unwrap_or_default()
    }

    pub fn link_graph(&self) -> LinkGraph {
        graph::build_graph(&self.inner.store.read())
    }

    pub fn broken_links(&self) -> Vec<BrokenLink> {
        graph::broken_links(&self.inner.store.read())
    }

    pub fn stats(&self) -> IndexStats {
        let state = self.inner.store.read();
        IndexStats {
            root: state.root().map(Path::to_path_buf),
            documents: state.len(),
            tags: state.tags().len(),
            links: state.documents().map(|doc| doc.links.len()).sum(),
            last_rebuild: state.last_rebuild(),
            scan_issues: state.scan_issues().to_vec(),
        }
    }
}
