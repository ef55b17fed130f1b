//! Link resolution and relationships between documents.

mod link_graph;
pub mod resolution;

pub use link_graph::{BrokenLink, GraphEdge, GraphNode, LinkGraph, backlinks, broken_links, build_graph};
pub(crate) use link_graph::sort_by_display_name;
pub use resolution::{ResolvedLink, is_media_target, resolve, resolve_with_heading};
