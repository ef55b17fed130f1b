//! Watch command: keep the index live and report changes.

use crate::cli::args::WatchArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;
use crate::watcher::VaultWatcher;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct ChangeReport {
    pub generation: u64,
    pub notes: usize,
    pub tags: usize,
    pub links: usize,
}

fn report(vault: &Vault) -> ChangeReport {
    let stats = vault.stats();
    ChangeReport {
        generation: vault.generation(),
        notes: stats.documents,
        tags: stats.tags,
        links: stats.links,
    }
}

/// Runs until the process is interrupted.
pub fn run(vault: &Vault, args: &WatchArgs, output: &Output) -> Result<ExitCode> {
    let mut changes = vault.on_index_changed();
    let _watcher = VaultWatcher::start(vault.clone(), Duration::from_millis(args.debounce_ms))?;

    output.info("Watching for changes (Ctrl-C to stop)");
    output.print_line(&report(vault))?;

    loop {
        match changes.blocking_recv() {
            Ok(_) => output.print_line(&report(vault))?,
            // Missed signals still mean the index moved on.
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "change notifications lagged");
                output.print_line(&report(vault))?;
            }
            Err(RecvError::Closed) => return Ok(ExitCode::Success),
        }
    }
}
