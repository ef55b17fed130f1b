//! Full-text substring search across indexed documents.

mod cancel;

pub use cancel::CancellationToken;

use crate::fs::VaultFs;
use crate::index::IndexStore;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A document whose content matched a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub location: PathBuf,
    pub display_name: String,
}

/// Find every document whose content contains `query`, ignoring case.
///
/// Content is read outside the index lock. The token is checked before each
/// read; once cancelled, the matches found so far are returned. Results are
/// sorted by display name, then location.
pub fn search(
    fs: &dyn VaultFs,
    store: &IndexStore,
    query: &str,
    token: &CancellationToken,
) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let candidates = store.read().sorted_documents();
    let mut results = Vec::new();

    for doc in candidates {
        if token.is_cancelled() {
            debug!(query, matched = results.len(), "search cancelled");
            break;
        }

        match fs.read_to_string(&doc.location) {
            Ok(content) => {
                if content.to_lowercase().contains(&needle) {
                    results.push(SearchResult {
                        location: doc.location.clone(),
                        display_name: doc.display_name.clone(),
                    });
                }
            }
            Err(e) => warn!(path = %doc.location.display(), error = %e, "search skipped unreadable document"),
        }
    }

    results.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.location.cmp(&b.location))
    });
    results
}
