//! Linkvault - a live wikilink, backlink, tag and full-text index for a folder
//! of markdown notes.
//!
//! # Overview
//!
//! A [`Vault`] scans its root once, parses every `.md`/`.markdown` document,
//! and then keeps itself current from file-system change events. It answers:
//! - link resolution (`[[Name]]`, `[[Name#Header]]`) under a configurable
//!   normalization policy
//! - backlinks, the link graph and broken links
//! - tags from inline `#tags` and front matter
//! - case-insensitive substring search with cooperative cancellation
//!
//! Every mutation fires a payload-free [`IndexChanged`] notification.
//!
//! # Example
//!
//! ```no_run
//! use linkvault::{CancellationToken, Settings, Vault};
//! use std::path::{Path, PathBuf};
//!
//! let vault = Vault::open(Settings {
//!     vault_root: Some(PathBuf::from("/path/to/vault")),
//!     ..Settings::default()
//! });
//!
//! if let Some(target) = vault.resolve_link(Path::new(""), "My Note") {
//!     for source in vault.get_backlinks(&target) {
//!         println!("{} links here", source.display_name);
//!     }
//! }
//!
//! let hits = vault.search("todo", &CancellationToken::none());
//! println!("{} notes mention todo", hits.len());
//! ```

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod fs;
pub mod graph;
pub mod index;
pub mod logging;
pub mod normalize;
pub mod parser;
pub mod scanner;
pub mod search;
pub mod types;
pub mod vault;
pub mod watcher;

// Re-export main types at crate root
pub use config::{Config, Settings};
pub use error::{Result, VaultError};
pub use events::IndexChanged;
pub use fs::{EntryKind, FsEntry, LocalFs, VaultFs};
pub use normalize::{NormalizationPolicy, SpaceReplacement};
pub use search::{CancellationToken, SearchResult};
pub use types::*;
pub use vault::{IndexStats, Vault};
pub use watcher::VaultWatcher;
