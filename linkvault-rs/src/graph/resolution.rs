//! Link target resolution.
//!
//! A target resolves by canonical name only: trim, normalize with the active
//! policy, look up. There is no path or fuzzy matching.

use crate::index::IndexState;
use crate::parser::{find_heading, split_target};
use crate::types::{DocumentRecord, Heading};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

const MEDIA_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "mp3", "wav", "ogg", "m4a", "flac", "mp4",
    "webm", "mov", "avi", "pdf",
];

/// A link target resolved down to an optional heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub location: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<Heading>,
}

/// Resolve a bare note name.
pub fn resolve<'a>(state: &'a IndexState, target: &str) -> Option<&'a Arc<DocumentRecord>> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    state.get_by_name(&state.policy().normalize_name(target))
}

/// Resolve `Name` or `Name#Header`.
///
/// The note must resolve. A header that matches nothing leaves `heading`
/// empty rather than failing the whole link.
pub fn resolve_with_heading(state: &IndexState, raw: &str) -> Option<ResolvedLink> {
    let (name, header) = split_target(raw);
    let record = resolve(state, name)?;

    Some(ResolvedLink {
        location: record.location.clone(),
        heading: header.and_then(|h| find_heading(&record.headings, h).cloned()),
    })
}

/// Whether a target names an attachment rather than a note.
pub fn is_media_target(target: &str) -> bool {
    target
        .rsplit_once('.')
        .is_some_and(|(_, ext)| MEDIA_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}
