//! Backlinks, the document link graph and broken links.

use crate::graph::resolution::{is_media_target, resolve};
use crate::index::IndexState;
use crate::types::DocumentRecord;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A document in the link graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub location: PathBuf,
    pub display_name: String,
}

/// A directed link between two indexed documents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GraphEdge {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Every document and every resolved link between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkGraph {
    /// Sorted by location.
    pub nodes: Vec<GraphNode>,
    /// Deduplicated, without self-links, sorted.
    pub edges: Vec<GraphEdge>,
}

/// A link whose target does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct BrokenLink {
    pub source: PathBuf,
    pub target: String,
    pub line: usize,
}

/// Documents other than `location` that link to it, sorted by display name
/// then location.
pub fn backlinks(state: &IndexState, location: &Path) -> Vec<Arc<DocumentRecord>> {
    let Some(target) = state.get_by_location(location) else {
        return Vec::new();
    };
    let policy = state.policy();

    let mut sources: Vec<Arc<DocumentRecord>> = state
        .documents()
        .filter(|doc| doc.location != target.location)
        .filter(|doc| {
            doc.links
                .iter()
                .any(|link| policy.normalize_name(&link.target) == target.name)
        })
        .cloned()
        .collect();

    sort_by_display_name(&mut sources);
    sources
}

/// Build the document graph from resolved links.
pub fn build_graph(state: &IndexState) -> LinkGraph {
    let docs = state.sorted_documents();
    let mut edges = BTreeSet::new();

    for doc in &docs {
        for link in &doc.links {
            if let Some(target) = resolve(state, &link.target) {
                if target.location != doc.location {
                    edges.insert(GraphEdge {
                        from: doc.location.clone(),
                        to: target.location.clone(),
                    });
                }
            }
        }
    }

    LinkGraph {
        nodes: docs
            .iter()
            .map(|doc| GraphNode {
                location: doc.location.clone(),
                display_name: doc.display_name.clone(),
            })
            .collect(),
        edges: edges.into_iter().collect(),
    }
}

/// Links to notes that are not in the index, sorted by source then target.
///
/// Embeds of attachments (images, PDFs, ...) are not notes and are skipped.
pub fn broken_links(state: &IndexState) -> Vec<BrokenLink> {
    let mut broken: Vec<BrokenLink> = state
        .documents()
        .flat_map(|doc| {
            doc.links
                .iter()
                .filter(|link| !is_media_target(&link.target))
                .filter(|link| resolve(state, &link.target).is_none())
                .map(|link| BrokenLink {
                    source: doc.location.clone(),
                    target: link.target.clone(),
                    line: link.line,
                })
        })
        .collect();

    broken.sort();
    broken
}

pub(crate) fn sort_by_display_name(docs: &mut [Arc<DocumentRecord>]) {
    docs.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.location.cmp(&b.location))
    });
}
