//! Keeps a [`Vault`] in sync with the disk via debounced file-system events.

use crate::error::{Result, VaultError};
use crate::types::FileChange;
use crate::vault::Vault;
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode};
use notify_debouncer_full::{DebounceEventResult, new_debouncer};
use std::any::Any;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default delay used to coalesce bursts of events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A running watch. Dropping it stops delivery.
pub struct VaultWatcher {
    _debouncer: Box<dyn Any>,
}

impl std::fmt::Debug for VaultWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultWatcher").finish_non_exhaustive()
    }
}

impl VaultWatcher {
    /// Watch the vault's root recursively, feeding every change into `vault`.
    pub fn start(vault: Vault, debounce: Duration) -> Result<Self> {
        let root = vault
            .settings()
            .vault_root
            .ok_or(VaultError::VaultNotConfigured)?;
        if !root.is_dir() {
            return Err(VaultError::VaultNotFound(root));
        }

        let target = vault.clone();
        let mut debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let changes: Vec<FileChange> =
                        events.iter().flat_map(|e| changes_for(&e.event)).collect();
                    if !changes.is_empty() {
                        debug!(count = changes.len(), "applying file changes");
                        target.handle_changes(changes);
                    }
                }
                Err(errors) => {
                    for e in errors {
                        warn!(error = %e, "watcher error");
                    }
                }
            }
        })
        .map_err(|e| VaultError::Watcher(e.to_string()))?;

        debouncer
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| VaultError::Watcher(e.to_string()))?;

        info!(root = %root.display(), "watching vault");
        Ok(Self {
            _debouncer: Box::new(debouncer),
        })
    }
}

/// Translate one file-system event into index changes.
///
/// Renames become a delete of the old path and an add of the new one.
pub fn changes_for(event: &Event) -> Vec<FileChange> {
    let paths = &event.paths;

    match &event.kind {
        EventKind::Create(_) => paths.iter().map(|p| FileChange::added(p)).collect(),
        EventKind::Remove(_) => paths.iter().map(|p| FileChange::deleted(p)).collect(),
        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::Both => match paths.as_slice() {
                [from, to, ..] => vec![FileChange::deleted(from), FileChange::added(to)],
                _ => Vec::new(),
            },
            RenameMode::From => paths.iter().map(|p| FileChange::deleted(p)).collect(),
            RenameMode::To => paths.iter().map(|p| FileChange::added(p)).collect(),
            // Unknown direction: decide by whether the path is still there.
            _ => paths.iter().map(|p| existence_change(p)).collect(),
        },
        EventKind::Modify(_) => paths.iter().map(|p| FileChange::updated(p)).collect(),
        EventKind::Any | EventKind::Access(_) | EventKind::Other => Vec::new(),
    }
}

fn existence_change(path: &Path) -> FileChange {
    if path.exists() {
        FileChange::added(path)
    } else {
        FileChange::deleted(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use notify::event::{CreateKind, DataChange, RemoveKind};
    use std::path::PathBuf;

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        let mut event = Event::new(kind);
        for p in paths {
            event = event.add_path(PathBuf::from(p));
        }
        event
    }

    #[test]
    fn test_create_modify_remove() {
        assert_eq!(
            changes_for(&event(EventKind::Create(CreateKind::File), &["/v/a.md"])),
            vec![FileChange::added("/v/a.md")]
        );
        assert_eq!(
            changes_for(&event(
                EventKind::Modify(ModifyKind::Data(DataChange::Content)),
                &["/v/a.md"]
            )),
            vec![FileChange::updated("/v/a.md")]
        );
        assert_eq!(
            changes_for(&event(EventKind::Remove(RemoveKind::Folder), &["/v/dir"])),
            vec![FileChange::deleted("/v/dir")]
        );
    }

    #[test]
    fn test_rename_both_is_delete_then_add() {
        let changes = changes_for(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/v/old.md", "/v/new.md"],
        ));
        assert_eq!(
            changes,
            vec![FileChange::deleted("/v/old.md"), FileChange::added("/v/new.md")]
        );
    }

    #[test]
    fn test_rename_halves() {
        assert_eq!(
            changes_for(&event(
                EventKind::Modify(ModifyKind::Name(RenameMode::From)),
                &["/v/old.md"]
            )),
            vec![FileChange::deleted("/v/old.md")]
        );
        assert_eq!(
            changes_for(&event(
                EventKind::Modify(ModifyKind::Name(RenameMode::To)),
                &["/v/new.md"]
            )),
            vec![FileChange::added("/v/new.md")]
        );
    }

    #[test]
    fn test_access_ignored() {
        let kind = EventKind::Access(notify::event::AccessKind::Any);
        assert!(changes_for(&event(kind, &["/v/a.md"])).is_empty());
    }

    #[test]
    fn test_start_requires_root() {
        let vault = Vault::open(Settings::default());
        assert!(matches!(
            VaultWatcher::start(vault, DEFAULT_DEBOUNCE),
            Err(VaultError::VaultNotConfigured)
        ));
    }
}
